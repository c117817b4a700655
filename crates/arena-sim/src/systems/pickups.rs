//! Pickup spawn manager — drops random power-ups at random intervals,
//! capped by a concurrency limit, with the same overlap-avoiding
//! rejection sampling the respawn path uses.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};

use arena_core::components::PickupState;
use arena_core::events::FxEvent;
use arena_core::types::{secs_to_ticks, PlayerId, Position};

use crate::engine::MatchConfig;
use crate::systems::{abilities, director};
use crate::world_setup;

/// Spawn-cycle scheduling state, owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct PickupSchedule {
    /// Tick of the next spawn attempt.
    pub next_attempt_tick: u64,
}

impl PickupSchedule {
    /// Arm the next attempt a random interval from now.
    pub fn arm(&mut self, rng: &mut ChaCha8Rng, config: &MatchConfig, current_tick: u64) {
        let cfg = &config.pickups;
        let wait = if cfg.max_interval_secs > cfg.min_interval_secs {
            rng.gen_range(cfg.min_interval_secs..cfg.max_interval_secs)
        } else {
            cfg.min_interval_secs
        };
        self.next_attempt_tick = current_tick + secs_to_ticks(wait);
    }
}

/// Check the schedule and run one spawn attempt when due. A cycle with
/// no free spawn point is skipped, never retried early.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    schedule: &mut PickupSchedule,
    config: &MatchConfig,
    current_tick: u64,
    next_pickup_id: &mut u32,
    fx: &mut Vec<FxEvent>,
) {
    if current_tick < schedule.next_attempt_tick {
        return;
    }
    schedule.arm(rng, config, current_tick);

    let cfg = &config.pickups;
    if cfg.grants.is_empty() || cfg.spawn_points.is_empty() {
        return;
    }

    let active = world.query_mut::<&PickupState>().into_iter().count();
    if active >= cfg.max_concurrent {
        trace!(active, "pickup cycle skipped: concurrency cap");
        return;
    }

    let grant = cfg.grants[rng.gen_range(0..cfg.grants.len())];

    let mut position = None;
    for _ in 0..config.max_spawn_attempts {
        let candidate = cfg.spawn_points[rng.gen_range(0..cfg.spawn_points.len())];
        if director::spawn_area_clear(world, config, candidate, cfg.check_radius) {
            position = Some(candidate);
            break;
        }
    }
    let Some(position) = position else {
        warn!("could not find a free pickup spawn point this cycle");
        return;
    };

    let pickup_id = *next_pickup_id;
    *next_pickup_id += 1;
    world_setup::spawn_pickup(world, pickup_id, grant, position);
    fx.push(FxEvent::PickupSpawned {
        pickup_id,
        grant,
        position,
    });
}

/// Resolve a reported pickup collection: apply the grant and remove the
/// pickup. A stale id (already collected) is a silent no-op.
pub fn collect(
    world: &mut World,
    pickup_id: u32,
    player_id: PlayerId,
    current_tick: u64,
    fx: &mut Vec<FxEvent>,
) {
    let found = world
        .query_mut::<&PickupState>()
        .into_iter()
        .find(|(_, state)| state.pickup_id == pickup_id)
        .map(|(entity, state)| (entity, state.grant));

    let Some((entity, grant)) = found else {
        trace!(pickup_id, "collection for unknown pickup ignored");
        return;
    };

    let _ = world.despawn(entity);
    abilities::apply_grant(world, player_id, grant, current_tick, fx);
}

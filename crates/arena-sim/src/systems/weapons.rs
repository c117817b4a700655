//! Weapon system — fire-rate gating and per-shot projectile generation.
//!
//! The fire path reads ability state in priority order: sniper charges,
//! then timed sniper mode, then shotgun mode, then the standard round.

use hecs::World;
use tracing::{trace, warn};

use arena_core::components::{AbilityState, Combatant, Weapon};
use arena_core::constants::DT;
use arena_core::enums::ProjectileKind;
use arena_core::events::FxEvent;
use arena_core::types::{heading_vec, secs_to_ticks, PlayerId, Position, Rotation};

use crate::engine::MatchConfig;
use crate::world_setup;

/// Tick down every weapon's cooldown, floored at zero.
pub fn tick_cooldowns(world: &mut World) {
    for (_entity, weapon) in world.query_mut::<&mut Weapon>() {
        weapon.cooldown_remaining = (weapon.cooldown_remaining - DT).max(0.0);
    }
}

/// One round about to be spawned: heading angle and muzzle speed.
struct ShotSpec {
    angle: f32,
    speed: f32,
}

/// Handle a fire request for `player_id`. Rejected silently while the
/// weapon is cooling or the firer is dead; a missing tank is a warned
/// no-op.
pub fn fire(
    world: &mut World,
    player_id: PlayerId,
    current_tick: u64,
    config: &MatchConfig,
    next_projectile_id: &mut u32,
    fx: &mut Vec<FxEvent>,
) {
    let mut found = false;
    let mut accepted: Option<(ProjectileKind, Vec<ShotSpec>, f32, i32, glam::Vec2)> = None;

    for (_entity, (combatant, state, weapon, pos, rot)) in world.query_mut::<(
        &Combatant,
        &mut AbilityState,
        &mut Weapon,
        &Position,
        &Rotation,
    )>() {
        if combatant.player_id != player_id {
            continue;
        }
        found = true;

        if !combatant.alive {
            trace!(player = %player_id, "fire rejected: dead");
            break;
        }
        if weapon.cooldown_remaining > 0.0 {
            trace!(player = %player_id, "fire rejected: cooling");
            break;
        }
        weapon.cooldown_remaining = weapon.fire_cooldown_secs;

        let (kind, shots) = select_shots(state, weapon, rot.angle, current_tick, config);
        accepted = Some((kind, shots, weapon.muzzle_offset, weapon.bullet_bounces, pos.0));
        break;
    }

    if !found {
        warn!(player = %player_id, "fire dropped: no tank for player");
        return;
    }
    let Some((kind, shots, muzzle_offset, bullet_bounces, origin)) = accepted else {
        return;
    };

    let expires_at_tick = current_tick + secs_to_ticks(config.projectile_ttl_secs);
    let rounds = shots.len() as u32;
    for shot in shots {
        let heading = heading_vec(shot.angle);
        let projectile_id = *next_projectile_id;
        *next_projectile_id += 1;

        let (bounces, pierce, destroy_on_hit) = match kind {
            ProjectileKind::Standard => (bullet_bounces, 0, true),
            ProjectileKind::Sniper => (
                0,
                config.sniper_pierce_budget,
                config.sniper_destroy_on_hit,
            ),
        };

        world_setup::spawn_projectile(
            world,
            projectile_id,
            player_id,
            kind,
            origin + heading * muzzle_offset,
            heading * shot.speed,
            bounces,
            pierce,
            destroy_on_hit,
            expires_at_tick,
        );
    }

    fx.push(FxEvent::ShotFired {
        player_id,
        kind,
        rounds,
    });
}

/// Decide what an accepted fire emits, consuming a sniper charge when
/// one is available.
fn select_shots(
    state: &mut AbilityState,
    weapon: &Weapon,
    facing: f32,
    current_tick: u64,
    config: &MatchConfig,
) -> (ProjectileKind, Vec<ShotSpec>) {
    use crate::systems::abilities;

    if state.sniper_charges > 0 {
        state.sniper_charges -= 1;
        return (
            ProjectileKind::Sniper,
            vec![ShotSpec {
                angle: facing,
                speed: config.sniper_speed,
            }],
        );
    }

    if abilities::sniper_timed_active(state, current_tick) {
        return (
            ProjectileKind::Sniper,
            vec![ShotSpec {
                angle: facing,
                speed: config.sniper_speed,
            }],
        );
    }

    if let Some(mode) = abilities::shotgun_active(state, current_tick) {
        return (
            ProjectileKind::Standard,
            pellet_headings(facing, mode.pellets, mode.spread_deg)
                .into_iter()
                .map(|angle| ShotSpec {
                    angle,
                    speed: weapon.bullet_speed,
                })
                .collect(),
        );
    }

    (
        ProjectileKind::Standard,
        vec![ShotSpec {
            angle: facing,
            speed: weapon.bullet_speed,
        }],
    )
}

/// Pellet headings fanned evenly across `[-spread/2, +spread/2]` about
/// the facing angle. One pellet flies straight along the facing.
pub fn pellet_headings(facing: f32, pellets: u32, spread_deg: f32) -> Vec<f32> {
    let pellets = pellets.max(1);
    if pellets == 1 {
        return vec![facing];
    }
    let half_spread = (spread_deg / 2.0).to_radians();
    (0..pellets)
        .map(|i| {
            let t = i as f32 / (pellets - 1) as f32;
            facing - half_spread + t * 2.0 * half_spread
        })
        .collect()
}

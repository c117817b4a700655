//! Match direction — scoring, win condition, respawn scheduling, and
//! spawn-point selection with overlap avoidance.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use arena_core::components::Combatant;
use arena_core::constants::{FALLBACK_SPAWN_P1, FALLBACK_SPAWN_P2, TANK_RADIUS};
use arena_core::enums::MatchPhase;
use arena_core::events::FxEvent;
use arena_core::types::{secs_to_ticks, PlayerId, Position, Rotation, Velocity};

use crate::engine::MatchConfig;
use crate::match_state::{RespawnQueue, ScoreBoard};

/// Handle a combatant death: score it, check the win condition, and
/// schedule the delayed respawn.
#[allow(clippy::too_many_arguments)]
pub fn on_combatant_destroyed(
    victim: PlayerId,
    attacker: PlayerId,
    current_tick: u64,
    config: &MatchConfig,
    score: &mut ScoreBoard,
    respawns: &mut RespawnQueue,
    phase: &mut MatchPhase,
    winner: &mut Option<PlayerId>,
    fx: &mut Vec<FxEvent>,
) {
    if *phase == MatchPhase::GameOver {
        return;
    }

    // Self-kills do not score; any other id does (friendly fire included).
    if attacker != victim {
        score.add_kill(attacker);
    }

    if let Some((leader, kills)) = score.leader() {
        if kills >= config.winning_score {
            *phase = MatchPhase::GameOver;
            *winner = Some(leader);
            fx.push(FxEvent::MatchWon { winner: leader });
            debug!(winner = %leader, kills, "match over");
            // No respawn for the final victim.
            return;
        }
    }

    let due_tick = current_tick + secs_to_ticks(config.respawn_delay_secs);
    if !respawns.schedule(victim, due_tick) {
        // A dead tank cannot normally die again before respawning.
        warn!(victim = %victim, "respawn already pending, not double-scheduling");
    }
}

/// Per-tick respawn resolution: complete every due task.
pub fn resolve_due_respawns(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &MatchConfig,
    respawns: &mut RespawnQueue,
    current_tick: u64,
    fx: &mut Vec<FxEvent>,
) {
    for player in respawns.take_due(current_tick) {
        let position = pick_spawn_position(world, rng, config, player);
        if respawn_at(world, player, position) {
            fx.push(FxEvent::Respawned {
                player_id: player,
                position,
            });
        } else {
            warn!(player = %player, "respawn dropped: no tank for player");
        }
    }
}

/// Reset a tank for play at `position`: full hp, alive, zero velocity,
/// identity rotation. Idempotent on a living tank — safe to call
/// defensively. Ability charges are deliberately left untouched.
/// Returns false if the player has no tank entity.
pub fn respawn_at(world: &mut World, player: PlayerId, position: Vec2) -> bool {
    for (_entity, (combatant, pos, vel, rot)) in
        world.query_mut::<(&mut Combatant, &mut Position, &mut Velocity, &mut Rotation)>()
    {
        if combatant.player_id != player {
            continue;
        }
        combatant.hp = combatant.max_hp;
        combatant.alive = true;
        pos.0 = position;
        vel.0 = Vec2::ZERO;
        *rot = Rotation::default();
        return true;
    }
    false
}

/// Pick a respawn position by rejection sampling over the configured
/// spawn points, falling back to the player's fixed home when sampling
/// exhausts. Never fails.
pub fn pick_spawn_position(
    world: &World,
    rng: &mut ChaCha8Rng,
    config: &MatchConfig,
    player: PlayerId,
) -> Vec2 {
    if !config.spawn_points.is_empty() {
        for _ in 0..config.max_spawn_attempts {
            let candidate = config.spawn_points[rng.gen_range(0..config.spawn_points.len())];
            if spawn_area_clear(world, config, candidate, config.spawn_check_radius) {
                return candidate;
            }
        }
    }
    warn!(player = %player, "no valid random spawn, using fallback");
    fallback_spawn(player)
}

/// Whether a circle of `radius` around `position` overlaps no blocking
/// geometry and no living tank. Pure query; nothing is mutated.
pub fn spawn_area_clear(world: &World, config: &MatchConfig, position: Vec2, radius: f32) -> bool {
    for blocker in &config.blockers {
        if position.distance(blocker.center) < radius + blocker.radius {
            return false;
        }
    }
    for (_entity, (combatant, pos)) in world.query::<(&Combatant, &Position)>().iter() {
        if combatant.alive && position.distance(pos.0) < radius + TANK_RADIUS {
            return false;
        }
    }
    true
}

/// Fixed per-player home position, used for initial placement and as
/// the spawn-sampling fallback.
pub fn fallback_spawn(player: PlayerId) -> Vec2 {
    match player {
        PlayerId::P1 => FALLBACK_SPAWN_P1,
        PlayerId::P2 => FALLBACK_SPAWN_P2,
        _ => Vec2::ZERO,
    }
}

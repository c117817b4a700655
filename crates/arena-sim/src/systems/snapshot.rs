//! Snapshot system: queries the ECS world and builds a complete
//! MatchSnapshot.
//!
//! This system is read-only — it never modifies the world. Entity lists
//! are sorted by id so equal states serialize identically.

use hecs::World;

use arena_core::components::*;
use arena_core::enums::MatchPhase;
use arena_core::events::FxEvent;
use arena_core::state::*;
use arena_core::types::{PlayerId, Position, Rotation, SimTime, Velocity};

use crate::match_state::{RespawnQueue, ScoreBoard};
use crate::systems::abilities;

/// Build a complete MatchSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: MatchPhase,
    winner: Option<PlayerId>,
    winning_score: u32,
    score: &ScoreBoard,
    respawns: &RespawnQueue,
    events: Vec<FxEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase,
        tanks: build_tanks(world, time.tick),
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        scores: score.entries(),
        winning_score,
        winner,
        pending_respawns: respawns.pending(),
        events,
    }
}

fn build_tanks(world: &World, current_tick: u64) -> Vec<TankView> {
    let mut tanks: Vec<TankView> = world
        .query::<(
            &Combatant,
            &AbilityState,
            &Position,
            &Velocity,
            &Rotation,
        )>()
        .iter()
        .map(|(_entity, (combatant, state, pos, vel, rot))| TankView {
            player_id: combatant.player_id,
            position: pos.0,
            velocity: vel.0,
            rotation: rot.angle,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            alive: combatant.alive,
            shield_charges: state.shield_charges,
            sniper_charges: state.sniper_charges,
            shotgun_active: abilities::shotgun_active(state, current_tick).is_some(),
            sniper_timed_active: abilities::sniper_timed_active(state, current_tick),
        })
        .collect();
    tanks.sort_by_key(|t| t.player_id);
    tanks
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&ProjectileState, &Position, &Velocity)>()
        .iter()
        .map(|(_entity, (state, pos, vel))| ProjectileView {
            projectile_id: state.projectile_id,
            owner: state.owner,
            kind: state.kind,
            position: pos.0,
            velocity: vel.0,
        })
        .collect();
    projectiles.sort_by_key(|p| p.projectile_id);
    projectiles
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&PickupState, &Position)>()
        .iter()
        .map(|(_entity, (state, pos))| PickupView {
            pickup_id: state.pickup_id,
            grant: state.grant,
            position: pos.0,
        })
        .collect();
    pickups.sort_by_key(|p| p.pickup_id);
    pickups
}

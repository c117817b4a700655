//! Entity spawn factories for setting up the match world.
//!
//! Creates tanks, projectiles, and pickups with appropriate component
//! bundles.

use glam::Vec2;
use hecs::World;

use arena_core::components::*;
use arena_core::constants::*;
use arena_core::enums::{PowerUpGrant, ProjectileKind};
use arena_core::types::{PlayerId, Position, Rotation, Velocity};

use crate::engine::MatchConfig;
use crate::systems::director;

/// Set up the initial match world: one tank per player slot at its
/// home position, full hp, empty ability state.
pub fn setup_match(world: &mut World, config: &MatchConfig) {
    for player_id in [PlayerId::P1, PlayerId::P2] {
        spawn_tank(world, player_id, config);
    }
}

/// Spawn a tank for `player_id` at its fixed home position.
pub fn spawn_tank(world: &mut World, player_id: PlayerId, config: &MatchConfig) -> hecs::Entity {
    world.spawn((
        Tank,
        Combatant {
            player_id,
            hp: config.tank_max_hp,
            max_hp: config.tank_max_hp,
            alive: true,
        },
        AbilityState::default(),
        Weapon {
            cooldown_remaining: 0.0,
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            bullet_speed: BULLET_SPEED,
            bullet_bounces: BULLET_BOUNCES,
            muzzle_offset: MUZZLE_OFFSET,
        },
        Position(director::fallback_spawn(player_id)),
        Velocity(Vec2::ZERO),
        Rotation::default(),
    ))
}

/// Spawn a projectile owned by `owner`. Budgets are fixed at spawn;
/// the owner's hull is excluded from the round's contacts at the rules
/// level from this moment on.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    world: &mut World,
    projectile_id: u32,
    owner: PlayerId,
    kind: ProjectileKind,
    position: Vec2,
    velocity: Vec2,
    remaining_bounces: i32,
    pierce_budget: i32,
    destroy_on_hit: bool,
    expires_at_tick: u64,
) -> hecs::Entity {
    world.spawn((
        Projectile,
        ProjectileState {
            projectile_id,
            owner,
            kind,
            remaining_bounces,
            pierce_budget,
            destroy_on_hit,
            expires_at_tick,
        },
        Position(position),
        Velocity(velocity),
    ))
}

/// Spawn a pickup entity on the floor.
pub fn spawn_pickup(
    world: &mut World,
    pickup_id: u32,
    grant: PowerUpGrant,
    position: Vec2,
) -> hecs::Entity {
    world.spawn((PickupState { pickup_id, grant }, Position(position)))
}

//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::PlayerId;

/// Marks an entity as a player-controlled tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tank;

/// Marks an entity as a live projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Per-tank health and lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub player_id: PlayerId,
    /// Current hit points, clamped to `0..=max_hp`.
    pub hp: i32,
    pub max_hp: i32,
    /// False from death until the respawn task completes. Dead tanks
    /// take no damage and resolve no contacts.
    pub alive: bool,
}

/// Shotgun mode parameters while the timed power-up is live.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShotgunMode {
    pub pellets: u32,
    /// Total fan angle in degrees.
    pub spread_deg: f32,
    /// Tick at which the mode lapses.
    pub expires_at_tick: u64,
}

/// Per-tank ability state. Always present on every tank from creation;
/// absence of a power-up is zero charges / `None`, never a missing
/// component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityState {
    /// Active shotgun mode, if any. Re-application overwrites the
    /// parameters and deadline (replace, not extend).
    pub shotgun: Option<ShotgunMode>,
    /// Consumable sniper charges, one per shot, additive across pickups.
    pub sniper_charges: u32,
    /// Timed sniper mode deadline, independent of charges.
    pub sniper_timed_until: Option<u64>,
    /// Hit-absorbing shield charges.
    pub shield_charges: u32,
}

/// Per-tank weapon configuration and fire-rate gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    /// Seconds until the next fire request is accepted.
    pub cooldown_remaining: f32,
    /// Cooldown applied after an accepted fire.
    pub fire_cooldown_secs: f32,
    /// Standard round muzzle speed.
    pub bullet_speed: f32,
    /// Bounce budget given to standard rounds.
    pub bullet_bounces: i32,
    /// Forward spawn offset for new rounds.
    pub muzzle_offset: f32,
}

/// Projectile rule state. Kinematics live in `Position`/`Velocity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Engine-assigned id, referenced by external contact reports.
    pub projectile_id: u32,
    pub owner: PlayerId,
    pub kind: ProjectileKind,
    /// Standard rounds: wall bounces left. Going negative destructs.
    pub remaining_bounces: i32,
    /// Sniper rounds: tank hits left before forced destruction.
    /// `-1` = unlimited.
    pub pierce_budget: i32,
    /// Sniper rounds: destruct on the first tank hit regardless of
    /// remaining pierce budget.
    pub destroy_on_hit: bool,
    /// Hard lifetime deadline, no renewal.
    pub expires_at_tick: u64,
}

/// A power-up pickup waiting on the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupState {
    /// Engine-assigned id, referenced by external collection reports.
    pub pickup_id: u32,
    pub grant: PowerUpGrant,
}

//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No match running yet (menu state, owned by the frontend).
    #[default]
    Idle,
    /// Match in progress; systems run each tick.
    Active,
    /// Match paused; nothing advances.
    Paused,
    /// A player reached the winning score. Terminal: scoring and
    /// respawns are suppressed until a new match starts.
    GameOver,
}

/// Projectile flavor, fixed at spawn time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Wall-bouncing round with a bounce budget.
    #[default]
    Standard,
    /// Wall-ignoring round with a pierce budget.
    Sniper,
}

/// A power-up grant as carried by a pickup or a direct command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PowerUpGrant {
    /// Temporary spread fire: `pellets` rounds fanned over `spread_deg`.
    Shotgun {
        pellets: u32,
        spread_deg: f32,
        duration_secs: f32,
    },
    /// Consumable single-shot sniper charges (additive across pickups).
    SniperCharges { count: u32 },
    /// Timed sniper mode, independent of charges.
    SniperTimed { duration_secs: f32 },
    /// Additive hit-absorbing shield charges.
    ShieldCharges { amount: u32 },
}

/// Timed ability that can lapse, named in expiry events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedAbility {
    Shotgun,
    SniperTimed,
}

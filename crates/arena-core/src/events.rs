//! Events emitted by the simulation for effect, audio, and UI sinks.
//!
//! The engine collects these during a tick and hands them out in the
//! snapshot; the frontend plays sounds and spawns effects from them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::PlayerId;

/// Feedback events for the frontend effect/audio system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FxEvent {
    /// A fire request was accepted and rounds left the muzzle.
    ShotFired {
        player_id: PlayerId,
        kind: ProjectileKind,
        rounds: u32,
    },
    /// A shield charge absorbed a hit; no damage was applied.
    ShieldBlocked { player_id: PlayerId, position: Vec2 },
    /// A tank ran out of hit points. Death effect plays here, not on
    /// every projectile impact.
    TankDestroyed {
        victim: PlayerId,
        attacker: PlayerId,
        position: Vec2,
    },
    /// A respawn task completed.
    Respawned { player_id: PlayerId, position: Vec2 },
    /// A pickup appeared on the floor.
    PickupSpawned {
        pickup_id: u32,
        grant: PowerUpGrant,
        position: Vec2,
    },
    /// A tank collected a pickup.
    PickupCollected {
        player_id: PlayerId,
        grant: PowerUpGrant,
    },
    /// A timed ability lapsed.
    AbilityExpired {
        player_id: PlayerId,
        ability: TimedAbility,
    },
    /// A player reached the winning score.
    MatchWon { winner: PlayerId },
}

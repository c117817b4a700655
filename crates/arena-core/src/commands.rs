//! Commands sent from the frontend (input layer, physics layer) to the
//! simulation.
//!
//! Commands are queued and processed in order at the next tick boundary,
//! which serializes all cross-entity mutation: one contact report runs to
//! completion (shield check, health, death, score) before the next is
//! examined.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::PowerUpGrant;
use crate::types::PlayerId;

/// What a projectile was reported to have touched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContactSurface {
    /// Solid geometry with an outward contact normal.
    Wall { normal: Vec2 },
    /// A tank hull, identified by its player slot.
    Tank { player_id: PlayerId },
    /// Anything else solid (props, debris).
    Other,
}

/// All inbound actions the simulation accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Match control ---
    /// Start (or restart) a match: fresh world, zeroed scores.
    StartMatch,
    /// Pause the simulation.
    Pause,
    /// Resume from pause.
    Resume,

    // --- Gameplay ---
    /// A player pressed fire. Rejected while the weapon is cooling,
    /// the firer is dead, or the match is not active.
    Fire { player_id: PlayerId },
    /// The physics layer reports a projectile contact.
    ReportContact {
        projectile_id: u32,
        surface: ContactSurface,
    },
    /// The physics layer reports a tank touching a pickup.
    CollectPickup {
        pickup_id: u32,
        player_id: PlayerId,
    },
    /// Apply a power-up directly, bypassing the pickup entity
    /// (scripted modes, tests).
    GrantPowerUp {
        player_id: PlayerId,
        grant: PowerUpGrant,
    },
}

//! Match state snapshot — the complete visible state handed to the
//! frontend each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::FxEvent;
use crate::types::{PlayerId, SimTime};

/// Complete match state broadcast to the frontend after each tick.
/// Entity lists are sorted by id so equal states serialize identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub tanks: Vec<TankView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub scores: Vec<ScoreEntry>,
    pub winning_score: u32,
    pub winner: Option<PlayerId>,
    /// Players waiting on a respawn task.
    pub pending_respawns: Vec<PlayerId>,
    pub events: Vec<FxEvent>,
}

/// A tank as seen by rendering and the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub player_id: PlayerId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing angle in radians.
    pub rotation: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub shield_charges: u32,
    pub sniper_charges: u32,
    pub shotgun_active: bool,
    pub sniper_timed_active: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub projectile_id: u32,
    pub owner: PlayerId,
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// A pickup on the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub pickup_id: u32,
    pub grant: PowerUpGrant,
    pub position: Vec2,
}

/// One scoreboard line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub kills: u32,
}

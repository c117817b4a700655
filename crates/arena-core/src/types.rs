//! Fundamental identity, geometric, and simulation-time types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer player identity, assigned once at match setup.
/// A two-player match uses slots 1 and 2; identity is never resolved
/// by name or tag at runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const P1: PlayerId = PlayerId(1);
    pub const P2: PlayerId = PlayerId(2);
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// 2D position in arena space (meters). Used as an ECS component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity in arena space (m/s). Used as an ECS component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Facing angle in radians (0 = +Y "up", clockwise positive).
/// Used as an ECS component on tanks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub angle: f32,
}

/// Unit heading vector for a facing angle (0 = +Y, clockwise positive).
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), angle.cos())
}

/// Reflect a velocity about a contact normal: `v' = v - 2(v·n)n`.
/// The normal is normalized first; a zero normal returns `v` unchanged
/// rather than producing NaNs.
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    if n == Vec2::ZERO {
        return v;
    }
    v - 2.0 * v.dot(n) * n
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Convert a duration in seconds to a whole number of ticks.
/// Negative durations clamp to zero.
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs.max(0.0) as f64 * crate::constants::TICK_RATE as f64) as u64
}

//! Simulation constants and tuning parameters.

use glam::Vec2;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Arena bounds ---

/// Half-extent of the square play area (meters). Projectiles beyond
/// this are cleaned up as a safety net behind wall collisions.
pub const ARENA_HALF_EXTENT: f32 = 12.0;

/// Tank hull radius used for spawn-overlap checks (meters).
pub const TANK_RADIUS: f32 = 0.5;

// --- Combatant ---

/// Hit points per tank.
pub const TANK_MAX_HP: i32 = 3;

// --- Weapon ---

/// Seconds between accepted fire requests.
pub const FIRE_COOLDOWN_SECS: f32 = 0.5;

/// Standard round muzzle speed (m/s).
pub const BULLET_SPEED: f32 = 12.0;

/// Wall bounces a standard round survives before the next wall kills it.
pub const BULLET_BOUNCES: i32 = 3;

/// Hard lifetime cap for any projectile (seconds).
pub const PROJECTILE_TTL_SECS: f32 = 6.0;

/// Forward spawn offset so a round clears the firer's hull (meters).
pub const MUZZLE_OFFSET: f32 = 0.6;

/// Damage per projectile hit.
pub const HIT_DAMAGE: i32 = 1;

// --- Sniper rounds ---

/// Sniper round muzzle speed (m/s).
pub const SNIPER_SPEED: f32 = 20.0;

/// Default tank hits a sniper round can deal before forced destruction.
/// `-1` denotes unlimited piercing.
pub const SNIPER_PIERCE_BUDGET: i32 = 1;

/// Whether sniper rounds destruct on the first tank hit by default.
pub const SNIPER_DESTROY_ON_HIT: bool = true;

// --- Match direction ---

/// Kills required to win.
pub const SCORE_TO_WIN: u32 = 5;

/// Delay between death and respawn (seconds).
pub const RESPAWN_DELAY_SECS: f32 = 1.5;

/// Candidate draws before spawn sampling gives up.
pub const MAX_SPAWN_ATTEMPTS: u32 = 12;

/// Clearance radius a respawn position must have (meters).
pub const SPAWN_CHECK_RADIUS: f32 = 0.6;

/// Fixed fallback spawn when sampling exhausts, per player slot.
pub const FALLBACK_SPAWN_P1: Vec2 = Vec2::new(-4.0, -4.0);
pub const FALLBACK_SPAWN_P2: Vec2 = Vec2::new(4.0, 4.0);

// --- Power-up defaults ---

/// Default shotgun grant: pellet count.
pub const SHOTGUN_PELLETS: u32 = 3;

/// Default shotgun grant: total fan angle (degrees).
pub const SHOTGUN_SPREAD_DEG: f32 = 20.0;

/// Default shotgun grant: duration (seconds).
pub const SHOTGUN_DURATION_SECS: f32 = 6.0;

/// Default sniper pickup: charges granted.
pub const SNIPER_CHARGES_GRANTED: u32 = 1;

/// Default shield pickup: charges granted.
pub const SHIELD_CHARGES_GRANTED: u32 = 1;

// --- Pickup spawning ---

/// Minimum seconds between pickup spawn attempts.
pub const PICKUP_MIN_INTERVAL_SECS: f32 = 8.0;

/// Maximum seconds between pickup spawn attempts.
pub const PICKUP_MAX_INTERVAL_SECS: f32 = 18.0;

/// Pickups allowed to exist at once.
pub const MAX_CONCURRENT_PICKUPS: usize = 2;

/// Clearance radius a pickup spawn must have (meters).
pub const PICKUP_CHECK_RADIUS: f32 = 0.5;

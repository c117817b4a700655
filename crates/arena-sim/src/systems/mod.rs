//! Systems that operate on the simulation world each tick or in
//! response to a queued command.
//!
//! Systems are functions that take `&mut World` (or `&World` for
//! read-only) plus explicit engine state. They do not own state — all
//! state lives in components or in `MatchEngine`.

pub mod abilities;
pub mod cleanup;
pub mod combat;
pub mod director;
pub mod movement;
pub mod pickups;
pub mod projectile;
pub mod snapshot;
pub mod weapons;

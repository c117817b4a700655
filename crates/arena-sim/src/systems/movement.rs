//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Tank steering itself lives outside the core; this keeps projectiles
//! (and any externally-set tank velocity) moving on the fixed step.

use hecs::World;

use arena_core::constants::DT;
use arena_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * DT;
    }
}

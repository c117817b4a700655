//! Cleanup system: removes projectiles that escaped the arena and
//! drains the per-tick despawn buffer.
//!
//! Uses a pre-allocated buffer to avoid per-tick allocation.

use hecs::{Entity, World};

use arena_core::components::Projectile;
use arena_core::constants::ARENA_HALF_EXTENT;
use arena_core::types::Position;

/// Remove out-of-bounds projectiles plus everything already queued in
/// the buffer (TTL expiry and similar).
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, (pos, _projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        if pos.0.x.abs() > ARENA_HALF_EXTENT || pos.0.y.abs() > ARENA_HALF_EXTENT {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

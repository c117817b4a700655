//! Projectile lifetime system.
//!
//! Every round carries a hard deadline set at spawn; no contact or
//! bounce renews it.

use hecs::{Entity, World};

use arena_core::components::ProjectileState;

/// Collect rounds whose time-to-live has lapsed.
pub fn expire(world: &mut World, current_tick: u64, despawn_buffer: &mut Vec<Entity>) {
    for (entity, state) in world.query_mut::<&ProjectileState>() {
        if current_tick >= state.expires_at_tick {
            despawn_buffer.push(entity);
        }
    }
}

//! Cleanup system: removes ducks from the live set.
//!
//! Uses a pre-allocated buffer to avoid per-tick allocation.

use hecs::{Entity, World};

use duckhunt_core::components::Duck;

/// Remove ducks whose death sequence has finished (no longer
/// renderable). Runs every tick.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, duck) in world.query_mut::<&Duck>() {
        if !duck.visible {
            despawn_buffer.push(entity);
        }
    }

    despawn(world, despawn_buffer);
}

/// Forced wave cleanup: remove every duck regardless of state.
pub fn remove_all(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, _duck) in world.query_mut::<&Duck>() {
        despawn_buffer.push(entity);
    }

    despawn(world, despawn_buffer);
}

fn despawn(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

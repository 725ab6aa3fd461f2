//! Entity spawn factories for the wave world.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use duckhunt_core::components::{Duck, Motion, MotionIntent};
use duckhunt_core::constants::{DUCK_ORIGIN_X, DUCK_ORIGIN_Y};
use duckhunt_core::types::Position;

use crate::flight;

/// Spawn a wave's ducks at the origin, each already on its first
/// free-flight leg.
pub fn spawn_ducks(world: &mut World, rng: &mut ChaCha8Rng, now: u64, count: u32, speed_level: u8) {
    for _ in 0..count {
        spawn_duck(world, rng, now, speed_level);
    }
}

/// Spawn one duck: alive at the origin, first leg installed.
pub fn spawn_duck(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    now: u64,
    speed_level: u8,
) -> hecs::Entity {
    let origin = Position::new(DUCK_ORIGIN_X, DUCK_ORIGIN_Y);
    let leg = flight::pick_leg(rng, origin, speed_level);

    let mut duck = Duck::new(speed_level);
    duck.facing = leg.facing;

    world.spawn((
        duck,
        origin,
        Motion {
            from: origin,
            to: leg.to,
            start_tick: now,
            delay_ticks: 0,
            duration_ticks: leg.duration_ticks,
            intent: MotionIntent::Flight,
        },
    ))
}

//! Free-flight leg selection — destinations, durations, and facing.
//!
//! Pure functions over plain data plus the session RNG. No ECS
//! dependency; the engine installs the resulting Motion components.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use duckhunt_core::constants::{
    flight_ms, ms_to_ticks, FLIGHT_JITTER_MAX_MS, MIN_FLIGHT_DISTANCE, WORLD_HEIGHT, WORLD_WIDTH,
};
use duckhunt_core::enums::Facing;
use duckhunt_core::types::Position;

/// A chosen free-flight leg.
pub struct FlightLeg {
    pub to: Position,
    pub duration_ticks: u64,
    pub facing: Facing,
}

/// Pick the next free-flight leg from the duck's current position.
pub fn pick_leg(rng: &mut ChaCha8Rng, from: Position, speed_level: u8) -> FlightLeg {
    let to = pick_destination(rng, from);
    FlightLeg {
        to,
        duration_ticks: leg_duration_ticks(rng, speed_level),
        facing: facing_for_travel(from, to),
    }
}

/// Uniformly random stage point at least MIN_FLIGHT_DISTANCE away.
///
/// Rejection sampling with no iteration cap: bounds that admit no valid
/// destination are a configuration error, not a runtime condition.
fn pick_destination(rng: &mut ChaCha8Rng, from: Position) -> Position {
    let origin = DVec2::new(from.x, from.y);
    loop {
        let candidate = DVec2::new(
            rng.gen_range(0.0..=WORLD_WIDTH),
            rng.gen_range(0.0..=WORLD_HEIGHT),
        );
        if origin.distance(candidate) >= MIN_FLIGHT_DISTANCE {
            return Position::new(candidate.x, candidate.y);
        }
    }
}

/// Leg duration: per-speed-level base plus bounded random jitter.
pub fn leg_duration_ticks(rng: &mut ChaCha8Rng, speed_level: u8) -> u64 {
    let ms = flight_ms(speed_level) + rng.gen_range(0..=FLIGHT_JITTER_MAX_MS);
    ms_to_ticks(ms)
}

/// Classify the travel direction into a flight facing.
///
/// Eight-way compass classification collapsed to the four flight poses:
/// downward travel uses the corresponding upward facing (there is no
/// downward sprite), and near-vertical travel splits on horizontal sign.
pub fn facing_for_travel(from: Position, to: Position) -> Facing {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    // y grows downward; fold the vertical sign away up front.
    let angle = dy.abs().atan2(dx);

    use std::f64::consts::PI;
    if angle < PI / 8.0 {
        Facing::Right
    } else if angle < PI / 2.0 {
        Facing::TopRight
    } else if angle < 7.0 * PI / 8.0 {
        Facing::TopLeft
    } else {
        Facing::Left
    }
}

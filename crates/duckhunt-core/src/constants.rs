//! Session constants and tuning parameters.

/// Simulation tick rate (Hz) — one tick per render frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Stage geometry (world units) ---

/// Stage width.
pub const WORLD_WIDTH: f64 = 800.0;

/// Stage height. The floor ducks fall to when shot.
pub const WORLD_HEIGHT: f64 = 600.0;

/// Ducks spawn at the bottom center of the stage.
pub const DUCK_ORIGIN_X: f64 = WORLD_WIDTH / 2.0;
pub const DUCK_ORIGIN_Y: f64 = WORLD_HEIGHT;

/// Off-screen exit point for the forced fly-away at wave end.
pub const FLY_AWAY_X: f64 = WORLD_WIDTH / 2.0;
pub const FLY_AWAY_Y: f64 = -500.0;

// --- Hit testing ---

/// A click kills every live duck within this radius of the world point.
pub const HIT_RADIUS: f64 = 60.0;

// --- Flight ---

/// Minimum straight-line distance of a free-flight destination from the
/// duck's current position.
pub const MIN_FLIGHT_DISTANCE: f64 = 300.0;

/// Random jitter added to every flight leg duration (milliseconds).
pub const FLIGHT_JITTER_MAX_MS: u32 = 300;

/// Highest valid speed level in level data.
pub const MAX_SPEED_LEVEL: u8 = 10;

/// Base flight leg duration (milliseconds) for a speed level 0-10.
/// Levels above 10 are rejected at level load.
pub fn flight_ms(speed_level: u8) -> u32 {
    match speed_level {
        0 => 3000,
        1 => 2800,
        2 => 2500,
        3 => 2000,
        4 => 1800,
        5 => 1500,
        6 => 1300,
        7 => 1200,
        8 => 800,
        9 => 600,
        _ => 500,
    }
}

// --- Death sequence ---

/// Delay between the shot pose and the start of the fall (milliseconds).
pub const DEATH_DELAY_MS: u32 = 450;

/// Duration of the fall to the floor (milliseconds).
pub const DEATH_FALL_MS: u32 = 600;

// --- Session ---

/// A level is won when kills exceed this fraction of total ducks.
pub const SUCCESS_RATIO: f64 = 0.6;

// --- Dog ---

/// Pre-level intro run across the stage.
pub const DOG_INTRO_MS: u32 = 2000;

/// Retrieve animation after each kill.
pub const DOG_RETRIEVE_MS: u32 = 1000;

/// Laugh at survivors when a wave ends with ducks still alive.
pub const DOG_LAUGH_MS: u32 = 1500;

/// Convert a millisecond duration to whole ticks, rounding to nearest.
pub fn ms_to_ticks(ms: u32) -> u64 {
    ((ms as f64 / 1000.0) * TICK_RATE as f64).round() as u64
}

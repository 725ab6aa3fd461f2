//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position on the stage (world units).
/// x grows rightward, y grows downward; the floor is at y = WORLD_HEIGHT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Viewport scale factors applied by the presentation layer.
/// Input events arrive in viewport coordinates and must be divided
/// back into world coordinates before hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportScale {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position in world units.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for ViewportScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// Map a click in viewport coordinates back to world coordinates.
/// The inverse of the stage scale the renderer applies.
pub fn viewport_to_world(scale: ViewportScale, point: Position) -> Position {
    Position {
        x: point.x / scale.x,
        y: point.y / scale.y,
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

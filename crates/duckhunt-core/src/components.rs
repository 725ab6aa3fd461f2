//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in systems and in the engine.

use serde::{Deserialize, Serialize};

use crate::enums::Facing;
use crate::types::Position;

/// A duck in the live set of the current wave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duck {
    /// False once shot. A dead duck never re-enters flight.
    pub alive: bool,
    pub facing: Facing,
    /// Speed level 0-10 from the level data.
    pub speed_level: u8,
    /// Cleared when the death fall completes; the renderer skips
    /// invisible ducks and cleanup despawns them.
    pub visible: bool,
}

impl Duck {
    pub fn new(speed_level: u8) -> Self {
        Self {
            alive: true,
            facing: Facing::default(),
            speed_level,
            visible: true,
        }
    }
}

/// What to do when a motion finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionIntent {
    /// Free flight leg: chain into another leg if the duck is still alive.
    Flight,
    /// Forced exit at wave end. No continuation.
    FlyAway,
    /// Fall to the floor after being shot. Thud and hide on completion.
    DeathFall,
}

/// An in-progress interpolated move. One per entity at most.
///
/// Replacing this component is the cancellation discipline: the motion
/// system only ever completes the component currently attached, so a
/// replaced motion's continuation can never fire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    pub from: Position,
    pub to: Position,
    /// Tick at which the motion was installed.
    pub start_tick: u64,
    /// Ticks to hold at `from` before interpolation begins.
    pub delay_ticks: u64,
    /// Interpolation length in ticks (after the delay).
    pub duration_ticks: u64,
    pub intent: MotionIntent,
}

impl Motion {
    /// Ticks elapsed since installation.
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_tick)
    }

    /// Interpolation parameter in [0, 1]; 0 while the delay holds.
    pub fn progress(&self, now: u64) -> f64 {
        let active = self.elapsed(now).saturating_sub(self.delay_ticks);
        if self.duration_ticks == 0 {
            return 1.0;
        }
        (active as f64 / self.duration_ticks as f64).min(1.0)
    }

    /// Whether the motion has run its full delay + duration.
    pub fn finished(&self, now: u64) -> bool {
        self.elapsed(now) >= self.delay_ticks + self.duration_ticks
    }
}

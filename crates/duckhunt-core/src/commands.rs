//! Player commands sent from the frontend to the session engine.
//!
//! Commands are queued and processed at the next tick boundary, before
//! any motion advances, so a shot resolves against positions exactly as
//! the player last saw them.

use serde::{Deserialize, Serialize};

use crate::types::ViewportScale;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new session from the main menu.
    StartGame,
    /// Fire at viewport coordinates. Rejected once ammunition is spent.
    Fire { x: f64, y: f64 },
    /// Update the viewport scale after a window resize.
    SetViewportScale { scale: ViewportScale },
    /// Return to the main menu from a terminal win/loss state.
    ReturnToMenu,
}

//! Session state snapshot — the complete visible state emitted each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{DogState, Facing, GamePhase, SkyColor, WavePhase};
use crate::events::AudioCue;
use crate::types::{Position, SimTime};

/// Complete session state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave_phase: WavePhase,
    pub sky: SkyColor,
    pub hud: HudView,
    /// Shots left in the current wave's ammunition budget.
    pub shots_remaining: u32,
    pub ducks: Vec<DuckView>,
    pub dog: DogView,
    /// One-shot cues emitted this tick; drained, never replayed.
    pub audio_events: Vec<AudioCue>,
}

/// Read-only HUD values; the presentation layer renders these verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    /// "Wave N of M", or blank when no wave is running.
    pub wave_status: String,
    /// Level title, "You Win!", "You Lose!", or blank.
    pub game_status: String,
}

/// A visible duck for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuckView {
    pub position: Position,
    pub facing: Facing,
    pub alive: bool,
    pub visible: bool,
}

/// Retriever dog state for the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DogView {
    pub state: DogState,
}

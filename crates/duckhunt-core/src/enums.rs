//! Enumeration types used throughout the session engine.

use serde::{Deserialize, Serialize};

/// Duck pose for the presentation layer's animation states.
///
/// Travel direction is classified eight ways and collapsed into the four
/// flight facings: downward travel uses the corresponding upward facing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
    TopLeft,
    TopRight,
    /// Falling after the shot pose.
    Dead,
    /// Frozen hit pose, held for the death delay.
    Shot,
}

/// Wave lifecycle within a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// No wave running (menu, intro, between levels).
    #[default]
    Idle,
    Active,
    /// End condition met; survivors flying away, death falls finishing.
    Ending,
    /// Fully inert; about to be cleaned up and advanced.
    Over,
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    /// Dog intro running before wave 1 of a level.
    LevelIntro,
    Active,
    Won,
    Lost,
}

/// Background cue: pink from the fly-away trigger until the next wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkyColor {
    #[default]
    Blue,
    Pink,
}

/// Retriever dog animation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DogState {
    #[default]
    Hidden,
    Intro,
    Retrieving,
    Laughing,
}

//! Events emitted by the session for the frontend sound system.

use serde::{Deserialize, Serialize};

/// One-shot audio cues. Fire-and-forget; the core never waits on playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioCue {
    /// Gun fired.
    Fire,
    /// Duck hit.
    Quack,
    /// Dead duck landed on the floor.
    Thud,
    /// Dog retrieving a kill.
    Bark,
    /// Session won.
    Win,
    /// Session lost.
    Loss,
}

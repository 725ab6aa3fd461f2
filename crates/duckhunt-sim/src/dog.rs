//! The retriever dog — the auxiliary agent whose animations hold a wave
//! in `ending` until they finish.
//!
//! Plain engine state, not an ECS entity: a state tag and a busy-until
//! tick. The renderer plays the matching animation; the engine only
//! cares whether the dog is still busy.

use duckhunt_core::constants::{ms_to_ticks, DOG_INTRO_MS, DOG_LAUGH_MS, DOG_RETRIEVE_MS};
use duckhunt_core::enums::DogState;

#[derive(Debug, Clone, Default)]
pub struct Dog {
    state: DogState,
    busy_until_tick: u64,
}

impl Dog {
    /// Pre-level run across the stage. Wave 1 starts when it finishes.
    pub fn level_intro(&mut self, now: u64) {
        self.state = DogState::Intro;
        self.busy_until_tick = now + ms_to_ticks(DOG_INTRO_MS);
    }

    /// Fetch a kill. Repeated retrieves extend the busy window.
    pub fn retrieve(&mut self, now: u64) {
        self.state = DogState::Retrieving;
        let until = now + ms_to_ticks(DOG_RETRIEVE_MS);
        self.busy_until_tick = self.busy_until_tick.max(until);
    }

    /// Laugh at survivors escaping at wave end.
    pub fn laugh(&mut self, now: u64) {
        self.state = DogState::Laughing;
        let until = now + ms_to_ticks(DOG_LAUGH_MS);
        self.busy_until_tick = self.busy_until_tick.max(until);
    }

    /// Return to hidden once the current animation window has passed.
    pub fn update(&mut self, now: u64) {
        if self.state != DogState::Hidden && now >= self.busy_until_tick {
            self.state = DogState::Hidden;
        }
    }

    /// Busy dogs count as outstanding motion for the wave-inert check.
    pub fn is_active(&self) -> bool {
        self.state != DogState::Hidden
    }

    pub fn state(&self) -> DogState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = DogState::Hidden;
        self.busy_until_tick = 0;
    }
}

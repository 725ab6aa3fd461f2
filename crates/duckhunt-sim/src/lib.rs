//! Session engine for the duck hunt core.
//!
//! Owns the hecs ECS world of ducks, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod dog;
pub mod engine;
pub mod flight;
pub mod systems;
pub mod world_setup;

pub use duckhunt_core as core;
pub use engine::SessionEngine;

#[cfg(test)]
mod tests;

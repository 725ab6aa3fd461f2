//! Systems that operate on the wave world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for
//! read-only). They do not own state — state lives in components and
//! in the engine.

pub mod cleanup;
pub mod motion;
pub mod snapshot;

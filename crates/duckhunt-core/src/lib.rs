//! Core types and definitions for the duck hunt session engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, level data, state snapshots, events, and
//! constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod level;
pub mod state;
pub mod types;

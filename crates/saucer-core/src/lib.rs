//! Core types and definitions for the SAUCER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, input state, frame snapshots, events, constants
//! and the pure geometry helpers both terrain variants rely on.
//! It has no dependency on any renderer or windowing layer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod input;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

//! SAUCER runner.
//!
//! Wires the simulation to an input source (key commands or the built-in
//! autopilot), a score display and frame renderers, either headless or on a
//! paced game-loop thread.

pub mod autopilot;
pub mod config;
pub mod display;
pub mod game_loop;
pub mod state;

pub use saucer_core as core;

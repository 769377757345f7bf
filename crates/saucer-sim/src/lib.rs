//! Simulation engine for SAUCER.
//!
//! Owns the hecs ECS world, runs systems once per frame,
//! and produces FrameSnapshots for the renderer.

pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use saucer_core as core;

#[cfg(test)]
mod tests;

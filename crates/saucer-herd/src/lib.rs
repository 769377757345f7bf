//! Herd behaviour for SAUCER.
//!
//! Implements the cow wander/capture state machine and the per-terrain
//! herd profiles it is tuned by. No ECS dependency: systems hand in plain
//! data and apply the returned update.

pub mod fsm;
pub mod profiles;

pub use saucer_core as core;

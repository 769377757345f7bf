//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or is passed in.

pub mod beam;
pub mod camera;
pub mod cleanup;
pub mod craft;
pub mod herd;
pub mod repopulate;
pub mod snapshot;

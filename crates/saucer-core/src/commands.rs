//! Player commands sent from the platform layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible platform events the session reacts to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// A key went down. Unmapped keys are ignored.
    KeyDown { key: String },
    /// A key came back up.
    KeyUp { key: String },
    /// The output surface changed size. Never touches simulation state.
    Resize { width: u32, height: u32 },
}

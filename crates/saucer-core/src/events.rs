//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

/// Something noteworthy that happened during an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A cow entered the beam.
    CowCaptured { cow_id: u32 },
    /// A cow finished its abduction and was removed.
    CowAbducted { cow_id: u32, score: u32 },
    /// The herd ran out and a new batch was spawned.
    HerdRespawned { count: u32 },
}

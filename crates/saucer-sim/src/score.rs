//! Running score state.
//!
//! Stored in `SimulationEngine`, NOT as an ECS entity.

/// Score tracked by the engine. Only ever incremented.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    /// Cows that completed their abduction.
    pub cows_abducted: u32,
    /// Cows that entered the beam (includes those still rising).
    pub cows_captured: u32,
    /// Herd batches spawned after the initial one.
    pub herds_respawned: u32,
}

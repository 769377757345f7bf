//! Frame snapshot: everything a renderer needs to draw one frame.

use glam::DQuat;
use serde::{Deserialize, Serialize};

use crate::enums::{CowState, Variant};
use crate::events::GameEvent;
use crate::types::{Position, SimTime, SurfaceCoord};

/// Complete visible state handed to the renderer after each update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub variant: Variant,
    pub score: u32,
    pub craft: CraftView,
    pub beam: BeamView,
    /// Active cows, ordered by id.
    pub cows: Vec<CowView>,
    pub camera: CameraView,
    pub events: Vec<GameEvent>,
}

/// Craft pose.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CraftView {
    pub position: Position,
    pub rotation: DQuat,
    pub yaw: f64,
    /// Surface address (sphere variant only).
    pub surface: Option<SurfaceCoord>,
}

/// Cosmetic tractor beam parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamView {
    pub opacity: f64,
    pub glow_opacity: f64,
    pub rotation: f64,
    pub glow_rotation: f64,
}

/// One cow on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CowView {
    pub id: u32,
    pub position: Position,
    pub rotation: DQuat,
    pub state: CowState,
    pub heading: f64,
    pub abduction_progress: f64,
    /// Surface address (sphere variant only). Frozen at the capture point while
    /// the cow is being abducted; `position` is the lifted pose.
    pub surface: Option<SurfaceCoord>,
}

/// Camera pose and projection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Position,
    pub look_at: Position,
    pub up: Position,
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl FrameSnapshot {
    /// Number of cows currently being abducted.
    pub fn abducting_count(&self) -> usize {
        self.cows
            .iter()
            .filter(|c| c.state == CowState::BeingAbducted)
            .count()
    }
}

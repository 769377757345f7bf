//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DQuat;
use serde::{Deserialize, Serialize};

use crate::enums::CowState;
use crate::types::SurfaceCoord;

/// Marks the player's craft and carries its heading.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Craft {
    /// Yaw in radians. Unbounded; wraps through the trig functions.
    pub yaw: f64,
}

/// Marks a cow entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cow {
    /// Unique id, assigned in spawn order and never reused in a session.
    pub id: u32,
}

/// Wander and abduction bookkeeping for one cow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HerdMember {
    pub state: CowState,
    /// Wander heading in radians, [0, TAU).
    pub heading: f64,
    /// Seconds since the heading was last picked.
    pub wander_timer_secs: f64,
    /// 0.0 at capture, removal at >= 1.0.
    pub abduction_progress: f64,
    /// Cosmetic spin accumulated while abducted (radians).
    pub spin: f64,
}

/// Surface address of an entity on the planet (sphere variant only).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfaceAnchor {
    pub coord: SurfaceCoord,
    /// Distance from the planet centre.
    pub radius: f64,
}

/// World-space rotation of an entity's visual node.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: DQuat,
}

/// Cosmetic tractor beam under the craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TractorBeam {
    pub opacity: f64,
    pub glow_opacity: f64,
    pub rotation: f64,
    pub glow_rotation: f64,
}

impl Default for TractorBeam {
    fn default() -> Self {
        Self {
            opacity: crate::constants::BEAM_OPACITY.0,
            glow_opacity: crate::constants::BEAM_GLOW_OPACITY.0,
            rotation: 0.0,
            glow_rotation: 0.0,
        }
    }
}

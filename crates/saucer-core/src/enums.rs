//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Terrain the session is played on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Square arena on a flat ground plane.
    #[default]
    Flat,
    /// Spherical planet addressed by longitude/latitude.
    Sphere,
}

/// Cow behaviour state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CowState {
    /// Random walk on the surface.
    #[default]
    Wandering,
    /// Caught in the beam, rising toward the craft. Never reverts.
    BeingAbducted,
}

/// Logical controls read by the craft controller.
///
/// On the sphere the four movement controls are compass directions:
/// forward = north, backward = south, strafe-left = west, strafe-right = east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    YawLeft,
    YawRight,
}

impl Control {
    /// Map a platform key name to a control. Unknown keys are ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(Self::Forward),
            "s" | "arrowdown" => Some(Self::Backward),
            "a" | "arrowleft" => Some(Self::StrafeLeft),
            "d" | "arrowright" => Some(Self::StrafeRight),
            "q" => Some(Self::YawLeft),
            "e" => Some(Self::YawRight),
            _ => None,
        }
    }
}

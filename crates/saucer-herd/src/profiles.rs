//! Per-terrain herd tuning.

use saucer_core::constants::*;
use saucer_core::enums::Variant;

/// How the distance between a cow and the craft is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMetric {
    /// Ground-plane distance, height ignored.
    Planar,
    /// Straight-line distance in 3D.
    Full3d,
}

/// Static behaviour parameters for one terrain.
#[derive(Debug, Clone, Copy)]
pub struct HerdProfile {
    pub capture_radius: f64,
    pub capture_metric: CaptureMetric,
    /// Distance (flat) or degrees (sphere) covered per frame while wandering.
    pub wander_step: f64,
    pub wander_interval_secs: f64,
}

/// Get the herd profile for a terrain.
pub fn get_profile(variant: Variant) -> HerdProfile {
    match variant {
        Variant::Flat => HerdProfile {
            capture_radius: FLAT_CAPTURE_RADIUS,
            capture_metric: CaptureMetric::Planar,
            wander_step: COW_WANDER_SPEED,
            wander_interval_secs: WANDER_INTERVAL_SECS,
        },
        // Angular steps are not scaled by latitude and the capture test is a
        // chord distance, so ground speed relative to the radius drifts with
        // latitude. Kept as played.
        Variant::Sphere => HerdProfile {
            capture_radius: SPHERE_CAPTURE_RADIUS,
            capture_metric: CaptureMetric::Full3d,
            wander_step: COW_WANDER_STEP_DEG,
            wander_interval_secs: WANDER_INTERVAL_SECS,
        },
    }
}

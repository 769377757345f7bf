//! Follow camera.
//!
//! The rig is derived state: every frame it computes where it would like to
//! be relative to the craft and closes a fixed fraction of the gap, so it
//! lags and settles instead of being rigidly attached.

use glam::DVec3;
use hecs::World;

use saucer_core::components::{Craft, Orientation, SurfaceAnchor};
use saucer_core::constants::*;
use saucer_core::enums::Variant;
use saucer_core::geometry;
use saucer_core::state::CameraView;
use saucer_core::types::Position;

/// Camera state owned by the engine. Only `position` carries memory between frames.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: DVec3,
    pub look_at: DVec3,
    pub up: DVec3,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl CameraRig {
    /// Flat rigs start at the fixed opening shot; sphere rigs start on their target.
    pub fn new(variant: Variant, world: &World, viewport: (u32, u32)) -> Self {
        let mut rig = Self {
            position: DVec3::from_array(CAMERA_START),
            look_at: DVec3::ZERO,
            up: DVec3::Y,
            viewport_width: viewport.0,
            viewport_height: viewport.1,
        };
        if let Some(pose) = CraftPose::find(world) {
            let (desired, look_at, up) = pose.follow_target(variant);
            if variant == Variant::Sphere {
                rig.position = desired;
            }
            rig.look_at = look_at;
            rig.up = up;
        }
        rig
    }

    /// Width over height. A zero height is treated as one pixel.
    pub fn aspect(&self) -> f64 {
        self.viewport_width as f64 / self.viewport_height.max(1) as f64
    }

    /// Update projection inputs after the output surface changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: Position::from(self.position),
            look_at: Position::from(self.look_at),
            up: Position::from(self.up),
            fov_deg: CAMERA_FOV_DEG,
            aspect: self.aspect(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        }
    }
}

/// Craft state the camera follows.
struct CraftPose {
    position: DVec3,
    yaw: f64,
    orientation: Orientation,
    normal: Option<DVec3>,
}

impl CraftPose {
    fn find(world: &World) -> Option<Self> {
        world
            .query::<(&Craft, &Position, &Orientation, Option<&SurfaceAnchor>)>()
            .iter()
            .next()
            .map(|(_, (craft, pos, orientation, anchor))| Self {
                position: pos.as_dvec3(),
                yaw: craft.yaw,
                orientation: *orientation,
                normal: anchor.map(|a| geometry::surface_normal(a.coord)),
            })
    }

    /// Desired camera position, look-at point and up vector.
    fn follow_target(&self, variant: Variant) -> (DVec3, DVec3, DVec3) {
        match (variant, self.normal) {
            (Variant::Sphere, Some(normal)) => {
                let behind = self.orientation.rotation * DVec3::Z;
                (
                    self.position + normal * CAMERA_HEIGHT + behind * CAMERA_DISTANCE,
                    self.position,
                    normal,
                )
            }
            _ => {
                let (sin, cos) = self.yaw.sin_cos();
                (
                    DVec3::new(
                        self.position.x + sin * CAMERA_DISTANCE,
                        self.position.y + CAMERA_HEIGHT,
                        self.position.z + cos * CAMERA_DISTANCE,
                    ),
                    self.position - DVec3::Y * CAMERA_LOOK_DROP,
                    DVec3::Y,
                )
            }
        }
    }
}

/// Move the rig toward its follow target and re-aim it at the craft.
pub fn run(world: &World, rig: &mut CameraRig, variant: Variant) {
    let Some(pose) = CraftPose::find(world) else {
        return;
    };
    let (desired, look_at, up) = pose.follow_target(variant);
    rig.position = geometry::approach(rig.position, desired, CAMERA_SMOOTHING);
    rig.look_at = look_at;
    rig.up = up;
}

//! Built-in pilot: holds whatever movement keys bring the craft over the
//! nearest wandering cow. Lets the runner play unattended.

use saucer_core::enums::{Control, CowState, Variant};
use saucer_core::geometry;
use saucer_core::input::InputState;
use saucer_core::state::{CowView, FrameSnapshot};

/// Flat dead zone in world units (half a craft step, so it does not dither).
const FLAT_DEAD_ZONE: f64 = 0.1;
/// Sphere dead zone in degrees.
const SPHERE_DEAD_ZONE_DEG: f64 = 0.25;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target: Option<u32>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cow currently being chased, if any.
    pub fn target(&self) -> Option<u32> {
        self.target
    }

    /// Controls to hold for the next frame, given the last snapshot.
    pub fn next_input(&mut self, snapshot: &FrameSnapshot) -> InputState {
        let Some(cow) = self.pick_target(snapshot) else {
            self.target = None;
            return InputState::new();
        };
        if self.target != Some(cow.id) {
            log::debug!("autopilot chasing cow {}", cow.id);
            self.target = Some(cow.id);
        }

        let (right, back, dead_zone) = match snapshot.variant {
            Variant::Flat => {
                let craft = &snapshot.craft.position;
                let dx = cow.position.x - craft.x;
                let dz = cow.position.z - craft.z;
                // World delta into the craft's frame (inverse of the yaw rotation).
                let (sin, cos) = snapshot.craft.yaw.sin_cos();
                (dx * cos - dz * sin, dx * sin + dz * cos, FLAT_DEAD_ZONE)
            }
            Variant::Sphere => match (snapshot.craft.surface, cow.surface) {
                (Some(craft), Some(target)) => (
                    geometry::wrap_longitude(target.lon_deg - craft.lon_deg),
                    craft.lat_deg - target.lat_deg,
                    SPHERE_DEAD_ZONE_DEG,
                ),
                _ => return InputState::new(),
            },
        };

        let mut input = InputState::new();
        if right > dead_zone {
            input.press(Control::StrafeRight);
        } else if right < -dead_zone {
            input.press(Control::StrafeLeft);
        }
        if back > dead_zone {
            input.press(Control::Backward);
        } else if back < -dead_zone {
            input.press(Control::Forward);
        }
        input
    }

    /// Nearest wandering cow by the distance the capture test uses.
    fn pick_target<'a>(&self, snapshot: &'a FrameSnapshot) -> Option<&'a CowView> {
        let craft = &snapshot.craft.position;
        let range = |cow: &CowView| match snapshot.variant {
            Variant::Flat => cow.position.planar_range_to(craft),
            Variant::Sphere => cow.position.range_to(craft),
        };
        snapshot
            .cows
            .iter()
            .filter(|c| c.state == CowState::Wandering)
            .min_by(|a, b| range(a).total_cmp(&range(b)))
    }
}

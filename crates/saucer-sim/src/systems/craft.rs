//! Craft controller: turns held controls into a new craft pose.
//!
//! Flat: movement is relative to the craft's yaw and clamped to the arena.
//! Sphere: movement steps longitude/latitude directly (compass directions),
//! then the pose is rebuilt from the surface address.

use glam::DQuat;
use hecs::World;

use saucer_core::components::{Craft, Orientation, SurfaceAnchor};
use saucer_core::constants::*;
use saucer_core::enums::Variant;
use saucer_core::geometry;
use saucer_core::input::InputState;
use saucer_core::types::{Position, SurfaceCoord};

/// Apply one frame of input to the craft.
pub fn run(world: &mut World, input: &InputState, variant: Variant) {
    let (axis_x, axis_z) = input.movement_axes();
    let yaw_delta = input.yaw_axis() * CRAFT_YAW_SPEED;

    for (_entity, (craft, pos, orientation, anchor)) in world.query_mut::<(
        &mut Craft,
        &mut Position,
        &mut Orientation,
        Option<&mut SurfaceAnchor>,
    )>() {
        craft.yaw += yaw_delta;

        match (variant, anchor) {
            (Variant::Sphere, Some(anchor)) => {
                // Forward (-z) heads north.
                anchor.coord = geometry::normalize_surface(SurfaceCoord::new(
                    anchor.coord.lon_deg + axis_x * CRAFT_ANGULAR_STEP_DEG,
                    anchor.coord.lat_deg - axis_z * CRAFT_ANGULAR_STEP_DEG,
                ));
                *pos = Position::from(geometry::surface_to_cartesian(anchor.coord, anchor.radius));
                orientation.rotation = geometry::surface_orientation(anchor.coord, craft.yaw);
            }
            _ => {
                let (dx, dz) = geometry::rotate_by_yaw(
                    axis_x * CRAFT_SPEED,
                    axis_z * CRAFT_SPEED,
                    craft.yaw,
                );
                pos.x = geometry::clamp_to_arena(pos.x + dx);
                pos.z = geometry::clamp_to_arena(pos.z + dz);
                orientation.rotation = DQuat::from_rotation_y(craft.yaw);
            }
        }
    }
}

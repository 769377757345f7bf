//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the craft and cow entities with the component bundles
//! each terrain variant needs.

use std::f64::consts::TAU;

use glam::{DQuat, DVec3};
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use saucer_core::components::*;
use saucer_core::constants::*;
use saucer_core::enums::{CowState, Variant};
use saucer_core::geometry;
use saucer_core::types::{Position, SurfaceCoord};
use saucer_herd::fsm::facing_yaw;

/// Set up a fresh session world: the craft plus the first herd.
pub fn setup_session(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    variant: Variant,
    herd_size: usize,
    next_cow_id: &mut u32,
) {
    spawn_craft(world, variant);
    spawn_herd(world, rng, variant, herd_size, next_cow_id);
}

/// Spawn the craft: over the origin (flat) or over lon 0 / lat 0 (sphere).
pub fn spawn_craft(world: &mut World, variant: Variant) -> hecs::Entity {
    match variant {
        Variant::Flat => world.spawn((
            Craft::default(),
            Position::new(0.0, CRAFT_HOVER_HEIGHT, 0.0),
            Orientation {
                rotation: DQuat::IDENTITY,
            },
            TractorBeam::default(),
        )),
        Variant::Sphere => {
            let coord = SurfaceCoord::new(0.0, 0.0);
            let radius = PLANET_RADIUS + CRAFT_SURFACE_ALTITUDE;
            world.spawn((
                Craft::default(),
                Position::from(geometry::surface_to_cartesian(coord, radius)),
                Orientation {
                    rotation: geometry::surface_orientation(coord, 0.0),
                },
                SurfaceAnchor { coord, radius },
                TractorBeam::default(),
            ))
        }
    }
}

/// Spawn `count` wandering cows at random valid locations.
pub fn spawn_herd(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    variant: Variant,
    count: usize,
    next_cow_id: &mut u32,
) {
    for _ in 0..count {
        spawn_cow(world, rng, variant, next_cow_id);
    }
}

/// Spawn a single wandering cow somewhere on the terrain.
/// No overlap check against the craft or other cows.
pub fn spawn_cow(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    variant: Variant,
    next_cow_id: &mut u32,
) -> hecs::Entity {
    let heading = rng.gen_range(0.0..TAU);
    match variant {
        Variant::Flat => {
            let x = rng.gen_range(-COW_SPAWN_HALF_EXTENT..COW_SPAWN_HALF_EXTENT);
            let z = rng.gen_range(-COW_SPAWN_HALF_EXTENT..COW_SPAWN_HALF_EXTENT);
            spawn_flat_cow(world, DVec3::new(x, COW_GROUND_HEIGHT, z), heading, next_cow_id)
        }
        Variant::Sphere => {
            let lon = geometry::wrap_longitude(rng.gen_range(-180.0..180.0));
            let lat = rng.gen_range(-MAX_LATITUDE_DEG..=MAX_LATITUDE_DEG);
            spawn_sphere_cow(world, SurfaceCoord::new(lon, lat), heading, next_cow_id)
        }
    }
}

/// Spawn a wandering cow at a fixed ground position (flat).
pub fn spawn_flat_cow(
    world: &mut World,
    position: DVec3,
    heading: f64,
    next_cow_id: &mut u32,
) -> hecs::Entity {
    let cow = next_cow(next_cow_id);
    world.spawn((
        cow,
        new_member(heading),
        Position::from(position),
        Orientation {
            rotation: DQuat::from_rotation_y(facing_yaw(Variant::Flat, heading)),
        },
    ))
}

/// Spawn a wandering cow at a fixed surface coordinate (sphere).
pub fn spawn_sphere_cow(
    world: &mut World,
    coord: SurfaceCoord,
    heading: f64,
    next_cow_id: &mut u32,
) -> hecs::Entity {
    let coord = geometry::normalize_surface(coord);
    let radius = PLANET_RADIUS + COW_SURFACE_OFFSET;
    let cow = next_cow(next_cow_id);
    world.spawn((
        cow,
        new_member(heading),
        Position::from(geometry::surface_to_cartesian(coord, radius)),
        Orientation {
            rotation: geometry::surface_orientation(coord, facing_yaw(Variant::Sphere, heading)),
        },
        SurfaceAnchor { coord, radius },
    ))
}

fn next_cow(next_cow_id: &mut u32) -> Cow {
    let id = *next_cow_id;
    *next_cow_id += 1;
    Cow { id }
}

fn new_member(heading: f64) -> HerdMember {
    HerdMember {
        state: CowState::Wandering,
        heading,
        wander_timer_secs: 0.0,
        abduction_progress: 0.0,
        spin: 0.0,
    }
}

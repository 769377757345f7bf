//! Pure geometry helpers shared by the flat and spherical terrain.
//!
//! Angles on the planet are in degrees; everything else is radians.

use glam::{DQuat, DVec3};

use crate::constants::{ARENA_HALF_EXTENT, MAX_LATITUDE_DEG};
use crate::types::SurfaceCoord;

/// Clamp one horizontal axis to the flat arena.
pub fn clamp_to_arena(v: f64) -> f64 {
    v.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT)
}

/// Rotate a raw (x, z) input vector by `yaw` so movement follows the facing direction.
pub fn rotate_by_yaw(x: f64, z: f64, yaw: f64) -> (f64, f64) {
    let (sin, cos) = yaw.sin_cos();
    (x * cos + z * sin, -x * sin + z * cos)
}

/// Wrap a longitude into (-180, 180].
pub fn wrap_longitude(lon_deg: f64) -> f64 {
    let wrapped = (lon_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Clamp a latitude to the pole-free band.
pub fn clamp_latitude(lat_deg: f64) -> f64 {
    lat_deg.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG)
}

/// Rewrap longitude and reclamp latitude.
pub fn normalize_surface(coord: SurfaceCoord) -> SurfaceCoord {
    SurfaceCoord::new(wrap_longitude(coord.lon_deg), clamp_latitude(coord.lat_deg))
}

/// Outward unit normal of the sphere at `coord`.
///
/// lon = 0, lat = 0 points along +z; lat = 90 is +y; lon = 90 is +x.
pub fn surface_normal(coord: SurfaceCoord) -> DVec3 {
    let (sin_lat, cos_lat) = coord.lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = coord.lon_deg.to_radians().sin_cos();
    DVec3::new(cos_lat * sin_lon, sin_lat, cos_lat * cos_lon)
}

/// Spherical-to-Cartesian conversion at distance `radius` from the origin.
pub fn surface_to_cartesian(coord: SurfaceCoord, radius: f64) -> DVec3 {
    surface_normal(coord) * radius
}

/// Minimal rotation taking `reference` onto `target`.
///
/// Both inputs are normalised first; anti-parallel vectors get a half turn
/// about an arbitrary perpendicular axis.
pub fn align_up(reference: DVec3, target: DVec3) -> DQuat {
    DQuat::from_rotation_arc(reference.normalize(), target.normalize())
}

/// Orientation of a node standing on the planet at `coord`, turned by `yaw`
/// about its local up axis.
pub fn surface_orientation(coord: SurfaceCoord, yaw: f64) -> DQuat {
    align_up(DVec3::Y, surface_normal(coord)) * DQuat::from_rotation_y(yaw)
}

/// Move `current` by `fraction` of the way toward `target`.
pub fn approach(current: DVec3, target: DVec3, fraction: f64) -> DVec3 {
    current + (target - current) * fraction
}

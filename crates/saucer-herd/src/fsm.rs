//! Cow behaviour finite state machine.
//!
//! Pure functions that compute wander steps, capture transitions and
//! abduction progress for one cow given the craft's position.
//! No ECS dependency: operates on plain data.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DQuat, DVec3};
use rand::Rng;

use saucer_core::components::{HerdMember, SurfaceAnchor};
use saucer_core::constants::*;
use saucer_core::enums::{CowState, Variant};
use saucer_core::geometry;
use saucer_core::types::SurfaceCoord;

use crate::profiles::{get_profile, CaptureMetric, HerdProfile};

/// Input to the cow FSM for a single entity.
pub struct CowContext {
    pub variant: Variant,
    pub member: HerdMember,
    pub position: DVec3,
    /// Present on the sphere; flat cows move in Cartesian space.
    pub anchor: Option<SurfaceAnchor>,
    pub craft_position: DVec3,
    /// Seconds since the previous update.
    pub dt: f64,
    /// Session time, drives the cosmetic tilt.
    pub elapsed_secs: f64,
}

/// Output from the cow FSM.
pub struct CowUpdate {
    pub member: HerdMember,
    pub position: DVec3,
    pub anchor: Option<SurfaceAnchor>,
    pub rotation: DQuat,
    /// Wandering -> BeingAbducted happened this update.
    pub captured: bool,
    /// Abduction finished; the cow must be removed.
    pub completed: bool,
}

/// Evaluate the FSM for one cow.
pub fn evaluate<R: Rng + ?Sized>(ctx: &CowContext, rng: &mut R) -> CowUpdate {
    let profile = get_profile(ctx.variant);

    match ctx.member.state {
        CowState::Wandering => evaluate_wandering(ctx, &profile, rng),
        CowState::BeingAbducted => evaluate_abducted(ctx),
    }
}

/// Whether a cow at `cow` is strictly inside the capture radius of a craft at `craft`.
pub fn within_capture(profile: &HerdProfile, cow: DVec3, craft: DVec3) -> bool {
    let distance = match profile.capture_metric {
        CaptureMetric::Planar => {
            let dx = cow.x - craft.x;
            let dz = cow.z - craft.z;
            (dx * dx + dz * dz).sqrt()
        }
        CaptureMetric::Full3d => cow.distance(craft),
    };
    distance < profile.capture_radius
}

/// Advance the wander timer, re-rolling the heading once it runs past the interval.
/// Returns the (heading, timer) pair to store.
pub fn advance_wander_timer<R: Rng + ?Sized>(
    heading: f64,
    timer_secs: f64,
    dt: f64,
    interval_secs: f64,
    rng: &mut R,
) -> (f64, f64) {
    let timer = timer_secs + dt;
    if timer > interval_secs {
        (rng.gen_range(0.0..TAU), 0.0)
    } else {
        (heading, timer)
    }
}

/// Yaw that turns a node's local +z (the cow's nose) toward the wander heading.
pub fn facing_yaw(variant: Variant, heading: f64) -> f64 {
    match variant {
        Variant::Flat => FRAC_PI_2 - heading,
        Variant::Sphere => FRAC_PI_2 + heading,
    }
}

fn evaluate_wandering<R: Rng + ?Sized>(
    ctx: &CowContext,
    profile: &HerdProfile,
    rng: &mut R,
) -> CowUpdate {
    let mut member = ctx.member;

    // Capture is decided on the start-of-frame position; a captured cow does not step.
    if within_capture(profile, ctx.position, ctx.craft_position) {
        let yaw = facing_yaw(ctx.variant, member.heading);
        let rotation = match (ctx.variant, ctx.anchor) {
            (Variant::Sphere, Some(anchor)) => geometry::surface_orientation(anchor.coord, yaw),
            _ => DQuat::from_rotation_y(yaw),
        };
        member.state = CowState::BeingAbducted;
        member.abduction_progress = 0.0;
        member.spin = yaw;
        return CowUpdate {
            member,
            position: ctx.position,
            anchor: ctx.anchor,
            rotation,
            captured: true,
            completed: false,
        };
    }

    let (heading, timer) = advance_wander_timer(
        member.heading,
        member.wander_timer_secs,
        ctx.dt,
        profile.wander_interval_secs,
        rng,
    );
    member.heading = heading;
    member.wander_timer_secs = timer;

    let yaw = facing_yaw(ctx.variant, heading);
    let (position, anchor, rotation) = match (ctx.variant, ctx.anchor) {
        (Variant::Sphere, Some(anchor)) => {
            let coord = geometry::normalize_surface(SurfaceCoord::new(
                anchor.coord.lon_deg + heading.cos() * profile.wander_step,
                anchor.coord.lat_deg + heading.sin() * profile.wander_step,
            ));
            let anchor = SurfaceAnchor {
                coord,
                radius: anchor.radius,
            };
            (
                geometry::surface_to_cartesian(coord, anchor.radius),
                Some(anchor),
                geometry::surface_orientation(coord, yaw),
            )
        }
        _ => {
            let position = DVec3::new(
                geometry::clamp_to_arena(ctx.position.x + heading.cos() * profile.wander_step),
                ctx.position.y,
                geometry::clamp_to_arena(ctx.position.z + heading.sin() * profile.wander_step),
            );
            (position, ctx.anchor, DQuat::from_rotation_y(yaw))
        }
    };

    CowUpdate {
        member,
        position,
        anchor,
        rotation,
        captured: false,
        completed: false,
    }
}

fn evaluate_abducted(ctx: &CowContext) -> CowUpdate {
    let mut member = ctx.member;
    member.abduction_progress += ABDUCTION_PROGRESS_STEP;
    member.spin += ABDUCTION_SPIN_SPEED;
    let tilt = (ctx.elapsed_secs * BEAM_PULSE_RATE).sin() * ABDUCTION_TILT_AMPLITUDE;

    let (position, rotation) = match (ctx.variant, ctx.anchor) {
        (Variant::Sphere, Some(anchor)) => (
            geometry::approach(ctx.position, ctx.craft_position, ABDUCTION_PULL_FRACTION),
            geometry::surface_orientation(anchor.coord, member.spin) * DQuat::from_rotation_x(tilt),
        ),
        _ => {
            let ceiling = ctx.craft_position.y - ABDUCTION_BEAM_DEPTH;
            let position = DVec3::new(
                ctx.position.x + (ctx.craft_position.x - ctx.position.x) * ABDUCTION_PULL_FRACTION,
                ceiling.min(ctx.position.y + ABDUCTION_RISE_SPEED),
                ctx.position.z + (ctx.craft_position.z - ctx.position.z) * ABDUCTION_PULL_FRACTION,
            );
            (
                position,
                DQuat::from_rotation_x(tilt) * DQuat::from_rotation_y(member.spin),
            )
        }
    };

    CowUpdate {
        completed: member.abduction_progress >= 1.0,
        member,
        position,
        anchor: ctx.anchor,
        rotation,
        captured: false,
    }
}

//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use saucer_core::components::*;
use saucer_core::enums::Variant;
use saucer_core::events::GameEvent;
use saucer_core::state::*;
use saucer_core::types::{Position, SimTime};

use crate::score::ScoreState;
use crate::systems::camera::CameraRig;

/// Build a complete FrameSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    variant: Variant,
    score: &ScoreState,
    camera: &CameraRig,
    events: Vec<GameEvent>,
) -> FrameSnapshot {
    let (craft, beam) = build_craft(world);

    FrameSnapshot {
        time: *time,
        variant,
        score: score.cows_abducted,
        craft,
        beam,
        cows: build_cows(world),
        camera: camera.view(),
        events,
    }
}

/// Build CraftView and BeamView from the craft entity.
fn build_craft(world: &World) -> (CraftView, BeamView) {
    world
        .query::<(
            &Craft,
            &Position,
            &Orientation,
            &TractorBeam,
            Option<&SurfaceAnchor>,
        )>()
        .iter()
        .next()
        .map(|(_, (craft, pos, orientation, beam, anchor))| {
            (
                CraftView {
                    position: *pos,
                    rotation: orientation.rotation,
                    yaw: craft.yaw,
                    surface: anchor.map(|a| a.coord),
                },
                BeamView {
                    opacity: beam.opacity,
                    glow_opacity: beam.glow_opacity,
                    rotation: beam.rotation,
                    glow_rotation: beam.glow_rotation,
                },
            )
        })
        .unwrap_or_default()
}

/// Build CowView list from all cow entities.
fn build_cows(world: &World) -> Vec<CowView> {
    let mut cows: Vec<CowView> = world
        .query::<(
            &Cow,
            &HerdMember,
            &Position,
            &Orientation,
            Option<&SurfaceAnchor>,
        )>()
        .iter()
        .map(|(_, (cow, member, pos, orientation, anchor))| CowView {
            id: cow.id,
            position: *pos,
            rotation: orientation.rotation,
            state: member.state,
            heading: member.heading,
            abduction_progress: member.abduction_progress,
            surface: anchor.map(|a| a.coord),
        })
        .collect();

    cows.sort_by_key(|c| c.id);
    cows
}

//! Tractor beam animation. Cosmetic only; nothing reads it back.

use hecs::World;

use saucer_core::components::TractorBeam;
use saucer_core::constants::*;

/// Pulse beam opacity with session time and advance its spin.
pub fn run(world: &mut World, elapsed_secs: f64) {
    let pulse = (elapsed_secs * BEAM_PULSE_RATE).sin();
    for (_entity, beam) in world.query_mut::<&mut TractorBeam>() {
        beam.opacity = BEAM_OPACITY.0 + pulse * BEAM_OPACITY.1;
        beam.glow_opacity = BEAM_GLOW_OPACITY.0 + pulse * BEAM_GLOW_OPACITY.1;
        beam.rotation += BEAM_SPIN;
        beam.glow_rotation += BEAM_GLOW_SPIN;
    }
}

//! Repopulation system: spawns a fresh herd the moment the last cow is gone.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use saucer_core::components::Cow;
use saucer_core::enums::Variant;
use saucer_core::events::GameEvent;

use crate::score::ScoreState;
use crate::world_setup;

/// Number of cows currently in the world.
pub fn herd_count(world: &World) -> usize {
    world.query::<&Cow>().iter().count()
}

/// Refill an empty herd. Returns whether a new batch was spawned.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    variant: Variant,
    herd_size: usize,
    next_cow_id: &mut u32,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) -> bool {
    if herd_count(world) > 0 {
        return false;
    }

    world_setup::spawn_herd(world, rng, variant, herd_size, next_cow_id);
    score.herds_respawned += 1;
    log::info!("herd cleared, spawned {herd_size} new cows");
    events.push(GameEvent::HerdRespawned {
        count: herd_size as u32,
    });
    true
}

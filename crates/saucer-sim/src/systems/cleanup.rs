//! Cleanup system: removes cows whose abduction finished and scores them.

use hecs::{Entity, World};

use saucer_core::components::Cow;
use saucer_core::events::GameEvent;

use crate::score::ScoreState;

/// Despawn every entity collected in the buffer during the herd pass.
/// Each removed cow adds exactly one point. Returns the number removed.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut removed = 0;

    for entity in despawn_buffer.drain(..) {
        let cow_id = match world.get::<&Cow>(entity) {
            Ok(cow) => cow.id,
            Err(_) => {
                debug_assert!(false, "despawn queued for a missing cow");
                continue;
            }
        };
        if world.despawn(entity).is_err() {
            continue;
        }

        score.cows_abducted += 1;
        removed += 1;
        log::info!("cow {cow_id} abducted, score {}", score.cows_abducted);
        events.push(GameEvent::CowAbducted {
            cow_id,
            score: score.cows_abducted,
        });
    }

    removed
}

//! Herd system: wander, capture and abduction for every cow.
//!
//! Calls the cow FSM from saucer-herd, then writes the results back into
//! the ECS. Cows that finish their abduction are queued in the despawn
//! buffer; removal happens after the pass in `cleanup`.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use saucer_core::components::{Cow, Craft, HerdMember, Orientation, SurfaceAnchor};
use saucer_core::enums::Variant;
use saucer_core::events::GameEvent;
use saucer_core::types::Position;
use saucer_herd::fsm::{evaluate, CowContext, CowUpdate};

use crate::score::ScoreState;

/// Run the herd system for one frame.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    variant: Variant,
    dt: f64,
    elapsed_secs: f64,
    despawn_buffer: &mut Vec<Entity>,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    let Some(craft_position) = find_craft_position(world) else {
        return;
    };

    // Collect updates in a buffer to avoid borrow issues with hecs
    let mut updates: Vec<(Entity, u32, CowUpdate)> = Vec::new();

    {
        let mut query =
            world.query::<(&Cow, &HerdMember, &Position, Option<&SurfaceAnchor>)>();
        for (entity, (cow, member, pos, anchor)) in query.iter() {
            let ctx = CowContext {
                variant,
                member: *member,
                position: pos.as_dvec3(),
                anchor: anchor.copied(),
                craft_position: craft_position.as_dvec3(),
                dt,
                elapsed_secs,
            };
            updates.push((entity, cow.id, evaluate(&ctx, rng)));
        }
    }

    // Apply updates
    for (entity, cow_id, update) in updates {
        if let Ok((member, pos, orientation, anchor)) = world.query_one_mut::<(
            &mut HerdMember,
            &mut Position,
            &mut Orientation,
            Option<&mut SurfaceAnchor>,
        )>(entity)
        {
            *member = update.member;
            *pos = Position::from(update.position);
            orientation.rotation = update.rotation;
            if let (Some(anchor), Some(new_anchor)) = (anchor, update.anchor) {
                *anchor = new_anchor;
            }
        } else {
            debug_assert!(false, "cow {cow_id} vanished during the herd pass");
            continue;
        }

        if update.captured {
            log::debug!("cow {cow_id} caught in the beam");
            score.cows_captured += 1;
            events.push(GameEvent::CowCaptured { cow_id });
        }
        if update.completed {
            despawn_buffer.push(entity);
        }
    }
}

/// Find the craft position (used by every cow's capture test).
fn find_craft_position(world: &World) -> Option<Position> {
    world
        .query::<(&Craft, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
}

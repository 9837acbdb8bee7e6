//! Per-tick rules: actor dispatch and the win condition.

use log::{info, trace};

use crate::game::entities::{EntityKind, bomb, bug};
use crate::game::error::EntityError;
use crate::game::state::GameState;
use crate::game::types::EntityId;
use crate::game::world::World;

/// An actor as it stood when the tick began.
struct Actor {
    id: EntityId,
    was_exploding: bool,
}

enum Step {
    Defer,
    Bomb,
    Bug,
}

/// Snapshot the grid-resident actors in row-major order.
fn collect_actors(world: &World) -> Vec<Actor> {
    world
        .grid()
        .occupied_locations()
        .into_iter()
        .filter_map(|location| world.entity_at(location))
        .filter(|entity| entity.kind.is_actor())
        .map(|entity| Actor {
            id: entity.id(),
            was_exploding: matches!(&entity.kind, EntityKind::Bomb(state) if state.exploding),
        })
        .collect()
}

/// Run one behaviour step for every actor that is still on the board.
///
/// A bomb chain-detonated earlier in the same tick is skipped, so every bomb
/// spends one full tick exploding before it cleans up.
pub fn run_actors(world: &mut World) -> Result<(), EntityError> {
    for actor in collect_actors(world) {
        let Some(entity) = world.entity(actor.id).filter(|entity| entity.is_placed()) else {
            continue;
        };
        let step = match &entity.kind {
            EntityKind::Bomb(state) if state.exploding && !actor.was_exploding => Step::Defer,
            EntityKind::Bomb(_) => Step::Bomb,
            EntityKind::RandomBug(_) | EntityKind::BlockBug(_) => Step::Bug,
            _ => continue,
        };
        match step {
            Step::Defer => trace!("[Rules] {} chained this tick, cleanup deferred", actor.id),
            Step::Bomb => bomb::act(world, actor.id)?,
            Step::Bug => bug::act(world, actor.id)?,
        }
    }
    Ok(())
}

/// End the game once at most one player is left on the board.
pub fn check_win_condition(game_state: &mut GameState) {
    if game_state.game_over {
        return;
    }
    let alive: Vec<EntityId> = game_state
        .players
        .iter()
        .copied()
        .filter(|player| game_state.world.is_placed(*player))
        .collect();
    if alive.len() > 1 {
        return;
    }

    game_state.game_over = true;
    game_state.winner = alive.first().copied();
    match game_state.winner_index() {
        Some(index) => info!("[Rules] game over winner=player{} tick={}", index + 1, game_state.ticks),
        None => info!("[Rules] game over draw tick={}", game_state.ticks),
    }
}

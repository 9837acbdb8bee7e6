//! Movement system.
//!
//! Player steps (blocking, bonus pickup, the queued bomb drop) and the random
//! one-cell step shared by the wandering bugs.

use log::{debug, trace};

use crate::config::game::BLOCK_BUG_WALL_CHANCE;
use crate::game::entities::player::drop_queued_bomb;
use crate::game::entities::{Brick, EntityKind};
use crate::game::error::EntityError;
use crate::game::types::{BonusKind, Direction, EntityId, Location};
use crate::game::world::World;

/// What a player finds on the cell it is stepping into.
enum Step {
    Blocked,
    Open,
    Collect(EntityId, BonusKind),
    Burn,
}

fn player_step(world: &World, destination: Location) -> Step {
    if !world.grid().is_valid(destination) {
        return Step::Blocked;
    }
    match world.entity_at(destination).map(|entity| (entity.id(), &entity.kind)) {
        None => Step::Open,
        Some((id, EntityKind::Bonus(bonus))) => Step::Collect(id, bonus.kind),
        Some((_, EntityKind::Fire(_))) => Step::Burn,
        Some(_) => Step::Blocked,
    }
}

/// Move a player one cell. Facing always changes; returns whether the player
/// actually moved.
pub fn move_player(world: &mut World, player: EntityId, direction: Direction) -> Result<bool, EntityError> {
    let player_index = world.player(player)?.player_index;
    world.try_entity_mut(player)?.direction = direction;

    let Some(origin) = world.location_of(player) else {
        return Ok(false);
    };
    let destination = origin.adjacent(direction);

    let (collected, into_fire) = match player_step(world, destination) {
        Step::Blocked => {
            trace!("[Movement] player {} blocked at {}", player_index + 1, destination);
            return Ok(false);
        }
        Step::Open => (None, false),
        Step::Collect(bonus, kind) => {
            world.detach(bonus)?;
            (Some(kind), false)
        }
        Step::Burn => (None, true),
    };

    world.move_to(player, destination)?;
    drop_queued_bomb(world, player, origin)?;

    if let Some(kind) = collected {
        world.player_mut(player)?.add_bonus(kind);
        debug!("[Movement] player {} collected {:?}", player_index + 1, kind);
    }
    if into_fire {
        world.detach(player)?;
    }
    Ok(true)
}

/// Returns `Some(into_fire)` when a bug may step onto `destination`.
fn bug_step(world: &World, destination: Location) -> Option<bool> {
    if !world.grid().is_valid(destination) {
        return None;
    }
    match world.entity_at(destination) {
        None => Some(false),
        Some(entity) if entity.kind.is_fire() => Some(true),
        Some(_) => None,
    }
}

/// Try the four cardinals in random order and take the first open one.
/// Returns whether the bug moved.
pub fn move_randomly(world: &mut World, bug: EntityId) -> Result<bool, EntityError> {
    let Some(origin) = world.location_of(bug) else {
        return Ok(false);
    };

    for direction in world.shuffled_cardinals() {
        let destination = origin.adjacent(direction);
        let Some(into_fire) = bug_step(world, destination) else {
            continue;
        };

        world.try_entity_mut(bug)?.direction = direction;
        world.move_to(bug, destination)?;
        if world.try_entity(bug)?.kind.is_block_bug() {
            lay_block(world, bug, origin)?;
        }
        trace!("[Movement] bug {} moved {} -> {}", bug, origin, destination);

        if into_fire {
            debug!("[Movement] bug {} walked into fire at {}", bug, destination);
            world.detach(bug)?;
        }
        return Ok(true);
    }
    Ok(false)
}

fn lay_block(world: &mut World, bug: EntityId, at: Location) -> Result<(), EntityError> {
    let kind = if world.random() > BLOCK_BUG_WALL_CHANCE {
        EntityKind::Brick(Brick::new())
    } else {
        EntityKind::Wall
    };
    let block = world.spawn_at(kind, at)?;
    if let EntityKind::BlockBug(state) = &mut world.try_entity_mut(bug)?.kind {
        state.placed_blocks.push(block);
    }
    Ok(())
}

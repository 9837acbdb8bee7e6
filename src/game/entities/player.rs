//! Player-controlled bomber bug.
//!
//! A bomb request only queues the drop; the bomb lands on the cell the player
//! leaves on its next successful move, so a player is never standing on its
//! own bomb.

use log::debug;

use crate::config::game::{BOMB_TIMER, DEFAULT_BOMB_RADIUS, DEFAULT_MAX_BOMBS};
use crate::game::entities::{Bomb, EntityKind};
use crate::game::error::EntityError;
use crate::game::types::{BonusKind, EntityId, Location};
use crate::game::world::World;

#[derive(Debug, Clone, PartialEq)]
pub struct BomberBug {
    pub player_index: usize,
    pub max_bombs: u32,
    pub bomb_radius: u32,
    pub has_super_bomb: bool,
    /// Bombs dropped by this player; stale entries are purged on demand.
    pub active_bombs: Vec<EntityId>,
    pub bomb_queued: bool,
}

impl BomberBug {
    pub fn new(player_index: usize) -> Self {
        Self {
            player_index,
            max_bombs: DEFAULT_MAX_BOMBS,
            bomb_radius: DEFAULT_BOMB_RADIUS,
            has_super_bomb: false,
            active_bombs: Vec::new(),
            bomb_queued: false,
        }
    }

    pub fn add_bonus(&mut self, kind: BonusKind) {
        match kind {
            BonusKind::ExpandRadius => self.bomb_radius += 1,
            BonusKind::AddBombs => self.max_bombs += 1,
            BonusKind::SuperBomb => self.has_super_bomb = true,
        }
    }
}

/// Drop entries for bombs that are no longer on the board and return how many
/// are still live.
pub fn update_bomb_count(world: &mut World, player: EntityId) -> Result<usize, EntityError> {
    let tracked = std::mem::take(&mut world.player_mut(player)?.active_bombs);
    let live: Vec<EntityId> = tracked
        .into_iter()
        .filter(|bomb| world.is_placed(*bomb))
        .collect();
    let count = live.len();
    world.player_mut(player)?.active_bombs = live;
    Ok(count)
}

/// Request a bomb drop. Returns `false` when the player already has
/// `max_bombs` bombs on the board.
pub fn place_bomb(world: &mut World, player: EntityId) -> Result<bool, EntityError> {
    let live = update_bomb_count(world, player)?;
    let state = world.player_mut(player)?;
    if live >= state.max_bombs as usize {
        debug!("[Player] {} bomb refused, {} already live", state.player_index + 1, live);
        return Ok(false);
    }
    state.bomb_queued = true;
    Ok(true)
}

/// Place the queued bomb, if any, at `at`. Called right after the player has
/// left `at`.
pub(crate) fn drop_queued_bomb(
    world: &mut World,
    player: EntityId,
    at: Location,
) -> Result<Option<EntityId>, EntityError> {
    let state = world.player_mut(player)?;
    if !state.bomb_queued {
        return Ok(None);
    }
    state.bomb_queued = false;
    let is_super = std::mem::take(&mut state.has_super_bomb);
    let bomb = Bomb::new(BOMB_TIMER, state.bomb_radius)
        .with_super(is_super)
        .with_owner(player);
    let player_index = state.player_index;

    let id = world.spawn_at(EntityKind::Bomb(bomb), at)?;
    world.player_mut(player)?.active_bombs.push(id);
    debug!(
        "[Player] {} dropped bomb {} at {} super={}",
        player_index + 1,
        id,
        at,
        is_super
    );
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonuses_upgrade_the_player() {
        let mut player = BomberBug::new(0);
        player.add_bonus(BonusKind::ExpandRadius);
        player.add_bonus(BonusKind::AddBombs);
        player.add_bonus(BonusKind::AddBombs);
        assert_eq!(player.bomb_radius, DEFAULT_BOMB_RADIUS + 1);
        assert_eq!(player.max_bombs, DEFAULT_MAX_BOMBS + 2);
        assert!(!player.has_super_bomb);
        player.add_bonus(BonusKind::SuperBomb);
        assert!(player.has_super_bomb);
    }
}

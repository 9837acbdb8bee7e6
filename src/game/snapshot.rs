//! Serialisable view of a game, for renderers and external tools.
//!
//! Bonuses still hidden inside bricks are not included.

use serde::{Deserialize, Serialize};

use crate::game::entities::{Entity, EntityKind};
use crate::game::state::GameState;
use crate::game::types::{BonusKind, Color, Direction, FireStage, Location};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub level: u32,
    pub tick: u64,
    pub game_over: bool,
    /// Player index of the winner; `None` while running or after a draw.
    pub winner: Option<usize>,
    /// Occupied cells in row-major order.
    pub cells: Vec<CellSnapshot>,
    pub players: Vec<PlayerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub location: Location,
    pub color: Color,
    pub direction: Direction,
    #[serde(flatten)]
    pub kind: KindSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindSnapshot {
    Wall,
    Brick,
    Bonus { bonus: BonusKind },
    Fire { stage: FireStage },
    Bomb { timer: u32, exploding: bool, is_super: bool },
    RandomBug,
    BlockBug { trail: usize },
    BomberBug { player_index: usize },
}

impl From<&EntityKind> for KindSnapshot {
    fn from(kind: &EntityKind) -> Self {
        match kind {
            EntityKind::Wall => KindSnapshot::Wall,
            EntityKind::Brick(_) => KindSnapshot::Brick,
            EntityKind::Bonus(bonus) => KindSnapshot::Bonus { bonus: bonus.kind },
            EntityKind::Fire(fire) => KindSnapshot::Fire { stage: fire.stage },
            EntityKind::Bomb(bomb) => KindSnapshot::Bomb {
                timer: bomb.timer,
                exploding: bomb.exploding,
                is_super: bomb.is_super,
            },
            EntityKind::RandomBug(_) => KindSnapshot::RandomBug,
            EntityKind::BlockBug(bug) => KindSnapshot::BlockBug {
                trail: bug.placed_blocks.len(),
            },
            EntityKind::BomberBug(player) => KindSnapshot::BomberBug {
                player_index: player.player_index,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player_index: usize,
    pub alive: bool,
    pub location: Option<Location>,
    pub max_bombs: u32,
    pub bomb_radius: u32,
    pub has_super_bomb: bool,
    pub active_bombs: usize,
}

fn cell(entity: &Entity, location: Location) -> CellSnapshot {
    CellSnapshot {
        location,
        color: entity.color,
        direction: entity.direction,
        kind: KindSnapshot::from(&entity.kind),
    }
}

impl GameSnapshot {
    pub fn capture(game_state: &GameState) -> Self {
        let world = game_state.world();
        let cells = world
            .grid()
            .occupied_locations()
            .into_iter()
            .filter_map(|location| world.entity_at(location).map(|entity| cell(entity, location)))
            .collect();

        let players = game_state
            .players()
            .iter()
            .filter_map(|id| {
                let player = world.player(*id).ok()?;
                let location = world.location_of(*id);
                Some(PlayerSnapshot {
                    player_index: player.player_index,
                    alive: location.is_some(),
                    location,
                    max_bombs: player.max_bombs,
                    bomb_radius: player.bomb_radius,
                    has_super_bomb: player.has_super_bomb,
                    active_bombs: player
                        .active_bombs
                        .iter()
                        .filter(|bomb| world.is_placed(**bomb))
                        .count(),
                })
            })
            .collect();

        Self {
            rows: world.grid().rows(),
            cols: world.grid().cols(),
            level: game_state.level(),
            tick: game_state.ticks(),
            game_over: game_state.is_game_over(),
            winner: game_state.winner_index(),
            cells,
            players,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

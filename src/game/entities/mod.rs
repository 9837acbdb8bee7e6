//! Game entities module.
//!
//! Every placed object is an [`Entity`]: a shared header (colour, facing,
//! placement) plus an [`EntityKind`] carrying the variant's own state. Variant
//! behaviour is dispatched by matching on the kind; the removal side effects each
//! variant attaches to the public `detach` contract are listed in
//! [`EntityKind::removal`].

pub mod bomb;
pub mod bug;
pub mod player;
pub mod terrain;

pub use bomb::{Bomb, FireCell};
pub use bug::{BlockBug, RandomBug, Wander};
pub use player::BomberBug;
pub use terrain::{Bonus, Brick, Fire};

use crate::config::game::PLAYER_COLORS;
use crate::game::types::{BonusKind, Color, Direction, EntityId, Location};

#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    pub color: Color,
    pub direction: Direction,
    /// `Some` exactly while the entity sits in its world's grid.
    location: Option<Location>,
    pub kind: EntityKind,
}

impl Entity {
    pub(crate) fn new(id: EntityId, color: Color, direction: Direction, kind: EntityKind) -> Self {
        Self {
            id,
            color,
            direction,
            location: None,
            kind,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn is_placed(&self) -> bool {
        self.location.is_some()
    }

    pub(crate) fn set_location(&mut self, location: Option<Location>) {
        self.location = location;
    }
}

#[derive(Debug, Clone)]
pub enum EntityKind {
    Wall,
    Brick(Brick),
    Bonus(Bonus),
    Fire(Fire),
    Bomb(Bomb),
    RandomBug(RandomBug),
    BlockBug(BlockBug),
    BomberBug(BomberBug),
}

/// Side effect a variant attaches to its public removal.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// Clear ownership and leave the grid.
    Plain,
    /// Public removal does nothing.
    Indestructible,
    /// Leave the grid, then spawn the hidden bonus on the vacated cell.
    RevealBonus(BonusKind),
    /// Force-remove every listed block still on the board, then leave.
    ClearTrail(Vec<EntityId>),
    /// Notify the observer of the player's death, then leave.
    NotifyDeath(usize),
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Wall => "wall",
            EntityKind::Brick(_) => "brick",
            EntityKind::Bonus(_) => "bonus",
            EntityKind::Fire(_) => "fire",
            EntityKind::Bomb(_) => "bomb",
            EntityKind::RandomBug(_) => "random bug",
            EntityKind::BlockBug(_) => "block bug",
            EntityKind::BomberBug(_) => "bomber bug",
        }
    }

    pub fn default_color(&self) -> Color {
        match self {
            EntityKind::Wall => Color::Gray,
            EntityKind::Brick(_) => Color::Brown,
            EntityKind::Bonus(_) => Color::Yellow,
            EntityKind::Fire(_) => Color::Orange,
            EntityKind::Bomb(_) => Color::Black,
            EntityKind::RandomBug(_) => Color::Green,
            EntityKind::BlockBug(_) => Color::Purple,
            EntityKind::BomberBug(bug) => player_color(bug.player_index),
        }
    }

    pub fn removal(&self) -> Removal {
        match self {
            EntityKind::Wall => Removal::Indestructible,
            EntityKind::Brick(Brick { bonus: Some(kind) }) => Removal::RevealBonus(*kind),
            EntityKind::BlockBug(bug) => Removal::ClearTrail(bug.placed_blocks.clone()),
            EntityKind::BomberBug(bug) => Removal::NotifyDeath(bug.player_index),
            _ => Removal::Plain,
        }
    }

    /// Bombs and the wandering bugs act on their own each tick; everything else
    /// only changes through explosions or player input.
    pub fn is_actor(&self) -> bool {
        matches!(
            self,
            EntityKind::Bomb(_) | EntityKind::RandomBug(_) | EntityKind::BlockBug(_)
        )
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, EntityKind::Wall)
    }

    pub fn is_brick(&self) -> bool {
        matches!(self, EntityKind::Brick(_))
    }

    pub fn is_fire(&self) -> bool {
        matches!(self, EntityKind::Fire(_))
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, EntityKind::Bomb(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self, EntityKind::BomberBug(_))
    }

    pub fn is_block_bug(&self) -> bool {
        matches!(self, EntityKind::BlockBug(_))
    }

    /// RandomBug and BlockBug.
    pub fn is_wandering_bug(&self) -> bool {
        matches!(self, EntityKind::RandomBug(_) | EntityKind::BlockBug(_))
    }
}

/// Player colours by index, wrapping past the fourth.
pub fn player_color(player_index: usize) -> Color {
    PLAYER_COLORS[player_index % PLAYER_COLORS.len()]
}

//! Passive entities: bricks, bonuses and fire. Walls carry no state and are
//! the bare [`EntityKind::Wall`](super::EntityKind::Wall) variant.

use crate::game::types::{BonusKind, EntityId, FireStage};

/// Destructible block, optionally hiding a power-up that appears when the
/// brick is destroyed through its public removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brick {
    pub bonus: Option<BonusKind>,
}

impl Brick {
    pub fn new() -> Self {
        Self { bonus: None }
    }

    pub fn with_bonus(kind: BonusKind) -> Self {
        Self { bonus: Some(kind) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bonus {
    pub kind: BonusKind,
}

impl Bonus {
    pub fn new(kind: BonusKind) -> Self {
        Self { kind }
    }
}

/// One cell of a blast. The ray's heading is the entity's facing.
#[derive(Debug, Clone, PartialEq)]
pub struct Fire {
    pub stage: FireStage,
    /// Bomb whose cleanup removes this fire.
    pub bomb: Option<EntityId>,
}

impl Fire {
    pub fn new(stage: FireStage, bomb: Option<EntityId>) -> Self {
        Self { stage, bomb }
    }
}

//! AI bug entities.
//!
//! Both bugs share the [`Wander`] countdown: every `move_interval` ticks they
//! try one random step (see [`move_randomly`]). A [`BlockBug`] is a wandering
//! bug plus the trail of blocks it has laid; removing it clears that trail.

use crate::config::game::{BUG_MOVE_INTERVAL_MIN, BUG_MOVE_INTERVAL_SPREAD};
use crate::game::entities::EntityKind;
use crate::game::error::EntityError;
use crate::game::systems::movement::move_randomly;
use crate::game::types::EntityId;
use crate::game::world::World;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wander {
    pub move_interval: u32,
    pub step_counter: u32,
}

impl Wander {
    pub fn new(move_interval: u32) -> Self {
        Self {
            move_interval: move_interval.max(1),
            step_counter: 0,
        }
    }

    /// Count one tick. Returns `true` (and restarts the count) when it is time
    /// to move.
    pub fn advance(&mut self) -> bool {
        self.step_counter += 1;
        if self.step_counter >= self.move_interval {
            self.step_counter = 0;
            true
        } else {
            false
        }
    }
}

/// Interval in `[MIN, MIN + SPREAD)` picked from a uniform draw in `[0, 1)`.
pub fn random_interval(draw: f64) -> u32 {
    BUG_MOVE_INTERVAL_MIN + ((draw * BUG_MOVE_INTERVAL_SPREAD as f64) as u32).min(BUG_MOVE_INTERVAL_SPREAD - 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomBug {
    pub wander: Wander,
}

impl RandomBug {
    pub fn new(move_interval: u32) -> Self {
        Self {
            wander: Wander::new(move_interval),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBug {
    pub wander: Wander,
    /// Every block this bug has laid, including ones since destroyed.
    pub placed_blocks: Vec<EntityId>,
}

impl BlockBug {
    pub fn new(move_interval: u32) -> Self {
        Self {
            wander: Wander::new(move_interval),
            placed_blocks: Vec::new(),
        }
    }
}

/// One behaviour step for a RandomBug or BlockBug.
pub fn act(world: &mut World, bug: EntityId) -> Result<(), EntityError> {
    let ready = match &mut world.try_entity_mut(bug)?.kind {
        EntityKind::RandomBug(random) => random.wander.advance(),
        EntityKind::BlockBug(block) => block.wander.advance(),
        _ => {
            return Err(EntityError::WrongKind {
                id: bug,
                expected: "wandering bug",
            });
        }
    };
    if ready {
        move_randomly(world, bug)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wander_fires_every_interval() {
        let mut wander = Wander::new(3);
        assert!(!wander.advance());
        assert!(!wander.advance());
        assert!(wander.advance());
        assert_eq!(wander.step_counter, 0);
        assert!(!wander.advance());
    }

    #[test]
    fn random_interval_range() {
        assert_eq!(random_interval(0.0), 20);
        assert_eq!(random_interval(0.999_999), 70);
        assert!((20..=70).contains(&random_interval(0.5)));
    }
}

//! Contract violations raised by the entity ownership protocol and the
//! player input surface.

use super::types::{EntityId, Location};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    #[error("entity {id} is already placed at {location}; detach it first")]
    AlreadyPlaced { id: EntityId, location: Location },
    #[error("entity {0} is not placed in a grid")]
    NotPlaced(EntityId),
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
    #[error("location {0} is outside the grid")]
    OutOfBounds(Location),
    #[error("entity {id} is not a {expected}")]
    WrongKind { id: EntityId, expected: &'static str },
    #[error("no player with index {0}")]
    UnknownPlayer(usize),
}

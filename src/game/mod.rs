pub mod demo;
pub mod entities;
pub mod error;
pub mod grid;
pub mod observer;
pub mod random;
pub mod snapshot;
pub mod state;
pub mod systems;
pub mod types;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::EntityError;
pub use observer::{GameObserver, LoggingObserver, NoopObserver};
pub use random::RandomSource;
pub use snapshot::GameSnapshot;
pub use state::{GameOptions, GameState};
pub use types::{BonusKind, Color, Direction, EntityId, FireStage, Location};
pub use world::World;

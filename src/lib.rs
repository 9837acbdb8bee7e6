//! Bug Bomber: a deterministic, tick-based bomber arena.
//!
//! Players drop timed bombs on an odd-sized board of walls and bricks, and
//! the last bomber bug standing wins. The engine is synchronous and
//! single-threaded. Randomness and effect notifications are injected as ports
//! ([`game::RandomSource`], [`game::GameObserver`]), so a seeded game replays
//! exactly.
//!
//! ```
//! use bug_bomber::game::{GameOptions, GameState};
//!
//! let mut game = GameState::new(GameOptions::default()).unwrap();
//! game.place_bomb(0).unwrap();
//! game.tick().unwrap();
//! assert_eq!(game.ticks(), 1);
//! ```

pub mod config;
pub mod game;

//! Game configuration constants.
//!
//! This module defines the main gameplay parameters such as tick cadence,
//! bomb fuse, board dimensions and level-generation tunables.

use crate::game::types::Color;

/// Milliseconds between two ticks when driven by the demo loop.
pub const TICK_RATE_MS: u64 = 300;

/// Default number of rows in the game grid. Must be odd for the wall lattice.
pub const GRID_ROWS: usize = 11;

/// Default number of columns in the game grid. Must be odd for the wall lattice.
pub const GRID_COLS: usize = 13;

/// Smallest board edge accepted by level generation.
pub const MIN_GRID_SIZE: usize = 5;

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 4;
pub const DEFAULT_PLAYERS: usize = 2;

/// Ticks before a freshly dropped bomb detonates (about 3 seconds at the default rate).
pub const BOMB_TIMER: u32 = 10;

pub const DEFAULT_BOMB_RADIUS: u32 = 2;
pub const DEFAULT_MAX_BOMBS: u32 = 1;

/// Brick target is `rows * cols / BRICK_DIVISOR * sqrt(level)`.
pub const BRICK_DIVISOR: f64 = 5.0;

/// Random brick placement gives up after `rows * cols * BRICK_ATTEMPTS_PER_CELL` tries.
pub const BRICK_ATTEMPTS_PER_CELL: usize = 10;

/// Wandering bugs move every `MIN .. MIN + SPREAD` ticks when no interval is given.
pub const BUG_MOVE_INTERVAL_MIN: u32 = 20;
pub const BUG_MOVE_INTERVAL_SPREAD: u32 = 51;

/// Probability that a block bug's trail block is an indestructible wall
/// rather than a brick.
pub const BLOCK_BUG_WALL_CHANCE: f64 = 0.25;

/// Player colours by player index.
pub const PLAYER_COLORS: [Color; 4] = [Color::Red, Color::Orange, Color::Blue, Color::Green];

//! Demo driver: runs a game on a timer with every player on autopilot and
//! prints each frame.
pub mod game_loop;
pub mod render;

pub mod generation;
pub mod movement;
pub mod render;
pub mod rules;

pub use movement::{move_player, move_randomly};
pub use render::{print_grid, render_grid, render_players};
pub use rules::{check_win_condition, run_actors};

//! Frame output for the demo loop: the text board, or one JSON snapshot per line.

use crate::game::state::GameState;
use crate::game::systems::print_grid;

pub fn print_frame(game_state: &GameState, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", game_state.snapshot().to_json()?);
    } else {
        print_grid(game_state);
    }
    Ok(())
}

/// Final line once the loop stops.
pub fn print_outcome(game_state: &GameState) {
    if !game_state.is_game_over() {
        println!("Stopped after {} ticks, no winner yet.", game_state.ticks());
        return;
    }
    match game_state.winner_index() {
        Some(index) => println!("Player {} wins after {} ticks!", index + 1, game_state.ticks()),
        None => println!("Draw after {} ticks.", game_state.ticks()),
    }
}

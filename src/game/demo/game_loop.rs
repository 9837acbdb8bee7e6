//! Interval-driven game loop for the demo binary.
//!
//! Each tick every live player gets a random input (maybe queue a bomb, then
//! step in a random cardinal), the engine advances one tick and the frame is
//! printed. The loop stops at game over or after `max_ticks`.

use std::time::Duration;

use log::{debug, info};

use crate::config::settings::Settings;
use crate::game::demo::render::{print_frame, print_outcome};
use crate::game::error::EntityError;
use crate::game::observer::LoggingObserver;
use crate::game::random::{self, RandomSource};
use crate::game::state::GameState;
use crate::game::types::Direction;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("engine error: {0}")]
    Engine(#[from] EntityError),
    #[error("cannot encode snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Feed every live player one random input.
pub fn autopilot(
    game_state: &mut GameState,
    rng: &mut dyn RandomSource,
    bomb_chance: f64,
) -> Result<(), EntityError> {
    for index in 0..game_state.players().len() {
        if !game_state.is_alive(index) {
            continue;
        }
        if rng.next_f64() < bomb_chance {
            game_state.place_bomb(index)?;
        }
        let direction = Direction::CARDINALS[rng.index(Direction::CARDINALS.len())];
        game_state.move_player(index, direction)?;
    }
    Ok(())
}

/// Build a game from `settings`. A seed makes both the level and the autopilot
/// reproducible.
pub fn build_game(settings: &Settings) -> Result<(GameState, Box<dyn RandomSource>), EntityError> {
    let (engine_rng, input_rng) = match settings.seed {
        Some(seed) => (random::seeded(seed), random::seeded(seed.wrapping_add(1))),
        None => (random::thread(), random::thread()),
    };
    let game_state = GameState::with_ports(
        settings.game_options(),
        engine_rng,
        Box::new(LoggingObserver),
    )?;
    Ok((game_state, input_rng))
}

/// Run a game to completion on a tokio interval.
pub async fn run_game_loop(settings: &Settings) -> Result<GameState, DemoError> {
    let (mut game_state, mut input_rng) = build_game(settings)?;
    info!(
        "[GameLoop] start players={} level={} grid={}x{} seed={:?}",
        game_state.player_count(),
        game_state.level(),
        game_state.rows(),
        game_state.cols(),
        settings.seed
    );
    print_frame(&game_state, settings.json)?;

    let mut interval = tokio::time::interval(Duration::from_millis(settings.tick_ms.max(1)));
    while !game_state.is_game_over() {
        if settings.max_ticks.is_some_and(|max| game_state.ticks() >= max) {
            debug!("[GameLoop] tick limit reached");
            break;
        }
        interval.tick().await;

        autopilot(&mut game_state, input_rng.as_mut(), settings.bomb_chance)?;
        game_state.tick()?;
        print_frame(&game_state, settings.json)?;
    }

    info!(
        "[GameLoop] finished ticks={} winner={:?}",
        game_state.ticks(),
        game_state.winner_index().map(|index| index + 1)
    );
    if !settings.json {
        print_outcome(&game_state);
    }
    Ok(game_state)
}

//! Main entry point for the demo driver.
//!
//! Loads settings, applies command-line overrides and runs a game with every
//! player on autopilot until someone wins or the tick limit is hit.

use std::path::PathBuf;
use std::process::ExitCode;

use bug_bomber::config::settings::Settings;
use bug_bomber::game::demo::game_loop::run_game_loop;
use clap::Parser;
use log::error;

#[derive(Debug, Parser)]
#[command(name = "bug-bomber", version, about = "Tick-based bomber arena running on autopilot")]
struct Args {
    /// Settings file (TOML). Defaults to `bug-bomber.toml` in the working directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of players, 1 to 4.
    #[arg(long)]
    players: Option<usize>,
    #[arg(long)]
    level: Option<u32>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds between ticks.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    tick_ms: Option<u64>,
    /// Stop after this many ticks.
    #[arg(long = "max-ticks")]
    max_ticks: Option<u64>,
    /// Print one JSON snapshot per tick instead of the text board.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(players) = self.players {
            settings.players = players;
        }
        if let Some(level) = self.level {
            settings.level = level;
        }
        if self.rows.is_some() {
            settings.rows = self.rows;
        }
        if self.cols.is_some() {
            settings.cols = self.cols;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_ms = tick_ms;
        }
        if self.max_ticks.is_some() {
            settings.max_ticks = self.max_ticks;
        }
        settings.json |= self.json;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let args = Args::parse();
    let mut settings = Settings::load_or_default(args.config.as_deref());
    args.apply(&mut settings);

    match run_game_loop(&settings).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("[Main] {}", err);
            ExitCode::FAILURE
        }
    }
}

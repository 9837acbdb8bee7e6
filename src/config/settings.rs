//! Runtime settings for the demo driver.
//!
//! * Read from `bug-bomber.toml` in the cwd unless `--config` names another file.
//! * Every field has a default, so the file and each key are optional.
//! * Command-line flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::config::game::{DEFAULT_PLAYERS, TICK_RATE_MS};
use crate::game::state::GameOptions;

pub const DEFAULT_SETTINGS_FILE: &str = "bug-bomber.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub players: usize,
    pub level: u32,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    /// Fixed seed for a reproducible run.
    pub seed: Option<u64>,
    pub tick_ms: u64,
    /// Stop after this many ticks even if nobody has won.
    pub max_ticks: Option<u64>,
    pub block_bug_chance: f64,
    /// Chance per tick that an autopilot player queues a bomb.
    pub bomb_chance: f64,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS,
            level: 1,
            rows: None,
            cols: None,
            seed: None,
            tick_ms: TICK_RATE_MS,
            max_ticks: None,
            block_bug_chance: 0.0,
            bomb_chance: 0.1,
            json: false,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path`, or the default file when `None`. A missing default file is
    /// silent; any other failure is logged and defaults are used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
        if !explicit && !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("[Settings] {}, using defaults", err);
                Self::default()
            }
        }
    }

    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            player_count: self.players,
            level: self.level,
            rows: self.rows,
            cols: self.cols,
            block_bug_chance: self.block_bug_chance,
        }
    }
}

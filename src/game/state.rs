//! Game state orchestrator.
//!
//! Owns the world, generates levels, drives ticks and decides the winner.

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::game::{DEFAULT_PLAYERS, GRID_COLS, GRID_ROWS, MAX_PLAYERS, MIN_GRID_SIZE, MIN_PLAYERS};
use crate::game::entities::player;
use crate::game::error::EntityError;
use crate::game::grid::Grid;
use crate::game::observer::{GameObserver, NoopObserver};
use crate::game::random::{self, RandomSource};
use crate::game::snapshot::GameSnapshot;
use crate::game::systems::generation::{self, LevelPlan};
use crate::game::systems::{movement, rules};
use crate::game::types::{Direction, EntityId, Location};
use crate::game::world::World;

/// Construction options. Out-of-range values are clamped, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub player_count: usize,
    pub level: u32,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    /// Chance that a spawned enemy is a BlockBug. Zero keeps the roster all RandomBugs.
    pub block_bug_chance: f64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYERS,
            level: 1,
            rows: None,
            cols: None,
            block_bug_chance: 0.0,
        }
    }
}

/// Round an edge up to odd and at least the minimum size.
fn normalise_edge(edge: usize) -> usize {
    let odd = if edge % 2 == 0 { edge + 1 } else { edge };
    odd.max(MIN_GRID_SIZE)
}

impl GameOptions {
    fn plan(&self) -> LevelPlan {
        let block_bug_chance = if self.block_bug_chance.is_finite() {
            self.block_bug_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        LevelPlan {
            rows: normalise_edge(self.rows.unwrap_or(GRID_ROWS)),
            cols: normalise_edge(self.cols.unwrap_or(GRID_COLS)),
            player_count: self.player_count.clamp(MIN_PLAYERS, MAX_PLAYERS),
            level: self.level.max(1),
            block_bug_chance,
        }
    }
}

pub struct GameState {
    pub(crate) world: World,
    pub(crate) plan: LevelPlan,
    pub(crate) players: Vec<EntityId>,
    pub(crate) game_over: bool,
    pub(crate) winner: Option<EntityId>,
    pub(crate) ticks: u64,
}

impl GameState {
    /// New game with a thread-local random source and no observer.
    pub fn new(options: GameOptions) -> Result<Self, EntityError> {
        Self::with_ports(options, random::thread(), Box::new(NoopObserver))
    }

    pub fn with_ports(
        options: GameOptions,
        rng: Box<dyn RandomSource>,
        observer: Box<dyn GameObserver>,
    ) -> Result<Self, EntityError> {
        let plan = options.plan();
        let mut game_state = Self {
            world: World::with_ports(plan.rows, plan.cols, rng, observer),
            plan,
            players: Vec::new(),
            game_over: false,
            winner: None,
            ticks: 0,
        };
        game_state.generate_level()?;
        Ok(game_state)
    }

    /// Throw away the board and lay out a fresh level from the same plan.
    pub fn generate_level(&mut self) -> Result<(), EntityError> {
        self.world.rebuild(self.plan.rows, self.plan.cols);
        self.players.clear();
        self.game_over = false;
        self.winner = None;
        self.ticks = 0;
        self.players = generation::generate(&mut self.world, &self.plan)?;
        Ok(())
    }

    /// Start over with the same player count and level. Every entity is new.
    pub fn reset(&mut self) -> Result<(), EntityError> {
        info!(
            "[GameState] reset level={} players={}",
            self.plan.level, self.plan.player_count
        );
        self.generate_level()
    }

    /// Advance the simulation by one step. Does nothing once the game is over.
    pub fn tick(&mut self) -> Result<(), EntityError> {
        if self.game_over {
            return Ok(());
        }
        rules::run_actors(&mut self.world)?;
        self.ticks += 1;
        self.check_win_condition();
        Ok(())
    }

    pub fn check_win_condition(&mut self) {
        rules::check_win_condition(self);
    }

    // ---------- player input ----------

    fn player_id(&self, player_index: usize) -> Result<EntityId, EntityError> {
        self.players
            .get(player_index)
            .copied()
            .ok_or(EntityError::UnknownPlayer(player_index))
    }

    /// Step a player one cell. Returns whether it moved; input after game over
    /// is ignored.
    pub fn move_player(&mut self, player_index: usize, direction: Direction) -> Result<bool, EntityError> {
        let id = self.player_id(player_index)?;
        if self.game_over {
            return Ok(false);
        }
        movement::move_player(&mut self.world, id, direction)
    }

    /// Queue a bomb for the player's next move. Returns whether it was queued.
    pub fn place_bomb(&mut self, player_index: usize) -> Result<bool, EntityError> {
        let id = self.player_id(player_index)?;
        if self.game_over {
            return Ok(false);
        }
        player::place_bomb(&mut self.world, id)
    }

    // ---------- accessors ----------

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn grid(&self) -> &Grid {
        self.world.grid()
    }

    /// Player handles by player index, dead players included.
    pub fn players(&self) -> &[EntityId] {
        &self.players
    }

    pub fn is_alive(&self, player_index: usize) -> bool {
        self.players
            .get(player_index)
            .is_some_and(|id| self.world.is_placed(*id))
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<EntityId> {
        self.winner
    }

    pub fn winner_index(&self) -> Option<usize> {
        let winner = self.winner?;
        self.world.player(winner).ok().map(|player| player.player_index)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn level(&self) -> u32 {
        self.plan.level
    }

    pub fn player_count(&self) -> usize {
        self.plan.player_count
    }

    pub fn rows(&self) -> usize {
        self.plan.rows
    }

    pub fn cols(&self) -> usize {
        self.plan.cols
    }

    pub fn player_spawn_locations(&self) -> [Location; 4] {
        generation::spawn_locations(self.plan.rows, self.plan.cols)
    }

    pub fn taboo_locations(&self) -> Vec<Location> {
        generation::taboo_locations(self.plan.rows, self.plan.cols)
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.world.set_observer(observer);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}

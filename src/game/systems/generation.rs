//! Level generation.
//!
//! Lays out the fixed wall lattice, scatters bricks outside the spawn corners,
//! hides bonuses from level 2, places the players and, from level 3, the enemy
//! bugs. Every random choice goes through the world's random source.

use log::{debug, warn};

use crate::config::game::{BRICK_ATTEMPTS_PER_CELL, BRICK_DIVISOR};
use crate::game::entities::bug::random_interval;
use crate::game::entities::{BlockBug, BomberBug, Brick, EntityKind, RandomBug};
use crate::game::error::EntityError;
use crate::game::types::{BonusKind, EntityId, Location};
use crate::game::world::World;

/// Parameters of one generated level. Dimensions are expected to be already
/// normalised (odd, at least the minimum size).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelPlan {
    pub rows: usize,
    pub cols: usize,
    pub player_count: usize,
    pub level: u32,
    /// Chance that each spawned enemy is a BlockBug rather than a RandomBug.
    pub block_bug_chance: f64,
}

/// Wall lattice cell: both coordinates odd.
pub fn is_lattice(location: Location) -> bool {
    location.row % 2 == 1 && location.col % 2 == 1
}

/// Spawn corners by player index: top-left, bottom-right, top-right, bottom-left.
pub fn spawn_locations(rows: usize, cols: usize) -> [Location; 4] {
    let (r, c) = (rows as i32 - 1, cols as i32 - 1);
    [
        Location::new(0, 0),
        Location::new(r, c),
        Location::new(0, c),
        Location::new(r, 0),
    ]
}

/// Each spawn corner plus its two orthogonal neighbours, for all four corners
/// regardless of how many players are in the game.
pub fn taboo_locations(rows: usize, cols: usize) -> Vec<Location> {
    let (r, c) = (rows as i32 - 1, cols as i32 - 1);
    vec![
        Location::new(0, 0),
        Location::new(0, 1),
        Location::new(1, 0),
        Location::new(r, c),
        Location::new(r - 1, c),
        Location::new(r, c - 1),
        Location::new(0, c),
        Location::new(0, c - 1),
        Location::new(1, c),
        Location::new(r, 0),
        Location::new(r, 1),
        Location::new(r - 1, 0),
    ]
}

pub fn brick_target(plan: &LevelPlan) -> usize {
    ((plan.rows * plan.cols) as f64 / BRICK_DIVISOR * (plan.level as f64).sqrt()).floor() as usize
}

pub fn bonus_target(plan: &LevelPlan) -> usize {
    ((plan.rows * plan.cols) as f64).sqrt().floor() as usize
}

pub fn enemy_target(plan: &LevelPlan) -> usize {
    if plan.level < 3 {
        return 0;
    }
    let shorter = plan.rows.min(plan.cols) as f64;
    ((plan.level - 2) as f64 * shorter.sqrt()).floor() as usize
}

/// Populate an empty world. Returns the player handles by player index.
pub fn generate(world: &mut World, plan: &LevelPlan) -> Result<Vec<EntityId>, EntityError> {
    let taboo = taboo_locations(plan.rows, plan.cols);

    place_walls(world, plan)?;
    let bricks = place_bricks(world, plan, &taboo)?;
    hide_bonuses(world, plan, &bricks);
    let players = place_players(world, plan)?;
    let enemies = place_enemies(world, plan, &taboo)?;

    debug!(
        "[Generation] level={} grid={}x{} bricks={} players={} enemies={}",
        plan.level,
        plan.rows,
        plan.cols,
        bricks.len(),
        players.len(),
        enemies
    );
    Ok(players)
}

fn place_walls(world: &mut World, plan: &LevelPlan) -> Result<(), EntityError> {
    for row in (1..plan.rows as i32).step_by(2) {
        for col in (1..plan.cols as i32).step_by(2) {
            world.spawn_at(EntityKind::Wall, Location::new(row, col))?;
        }
    }
    Ok(())
}

fn place_bricks(
    world: &mut World,
    plan: &LevelPlan,
    taboo: &[Location],
) -> Result<Vec<EntityId>, EntityError> {
    let target = brick_target(plan);
    let max_attempts = plan.rows * plan.cols * BRICK_ATTEMPTS_PER_CELL;
    let mut bricks = Vec::with_capacity(target);
    let mut attempts = 0;

    while bricks.len() < target && attempts < max_attempts {
        attempts += 1;
        let row = world.random_index(plan.rows) as i32;
        let col = world.random_index(plan.cols) as i32;
        let location = Location::new(row, col);

        if is_lattice(location) || taboo.contains(&location) || world.grid().get(location).is_some() {
            continue;
        }
        bricks.push(world.spawn_at(EntityKind::Brick(Brick::new()), location)?);
    }

    if bricks.len() < target {
        warn!(
            "[Generation] brick budget exhausted placed={} target={} attempts={}",
            bricks.len(),
            target,
            attempts
        );
    }
    Ok(bricks)
}

fn hide_bonuses(world: &mut World, plan: &LevelPlan, bricks: &[EntityId]) {
    let kinds = (plan.level.saturating_sub(1) as usize).min(BonusKind::ALL.len());
    if kinds == 0 || bricks.is_empty() {
        return;
    }
    let mut chosen = bricks.to_vec();
    world.shuffle(&mut chosen);
    chosen.truncate(bonus_target(plan).min(bricks.len()));

    for brick in chosen {
        let kind = BonusKind::ALL[world.random_index(kinds)];
        if let Some(entity) = world.entity_mut(brick) {
            if let EntityKind::Brick(state) = &mut entity.kind {
                state.bonus = Some(kind);
            }
        }
    }
}

fn place_players(world: &mut World, plan: &LevelPlan) -> Result<Vec<EntityId>, EntityError> {
    let corners = spawn_locations(plan.rows, plan.cols);
    corners
        .iter()
        .take(plan.player_count)
        .enumerate()
        .map(|(index, corner)| world.spawn_at(EntityKind::BomberBug(BomberBug::new(index)), *corner))
        .collect()
}

/// Returns how many enemies were actually placed.
fn place_enemies(world: &mut World, plan: &LevelPlan, taboo: &[Location]) -> Result<usize, EntityError> {
    let mut placed = 0;
    for _ in 0..enemy_target(plan) {
        let candidates: Vec<Location> = world
            .grid()
            .empty_locations()
            .into_iter()
            .filter(|location| !taboo.contains(location))
            .collect();
        if candidates.is_empty() {
            break;
        }
        let location = candidates[world.random_index(candidates.len())];

        let block_bug = plan.block_bug_chance > 0.0 && world.random() < plan.block_bug_chance;
        let interval = random_interval(world.random());
        let kind = if block_bug {
            EntityKind::BlockBug(BlockBug::new(interval))
        } else {
            EntityKind::RandomBug(RandomBug::new(interval))
        };
        world.spawn_at(kind, location)?;
        placed += 1;
    }
    Ok(placed)
}

//! Game rendering system (terminal).
//!
//! Text rendering of the board and player stats for the demo driver and for
//! debugging failed tests.

use std::fmt::Write;

use crate::game::entities::{Entity, EntityKind};
use crate::game::state::GameState;
use crate::game::types::{BonusKind, FireStage, Location};
use crate::game::world::World;

/// Two-character glyph for an occupant.
fn glyph(entity: &Entity) -> String {
    match &entity.kind {
        EntityKind::Wall => "██".to_string(),
        EntityKind::Brick(_) => "[]".to_string(),
        EntityKind::Bonus(bonus) => match bonus.kind {
            BonusKind::ExpandRadius => "+R".to_string(),
            BonusKind::AddBombs => "+B".to_string(),
            BonusKind::SuperBomb => "+S".to_string(),
        },
        EntityKind::Fire(fire) => match fire.stage {
            FireStage::Leading => "**".to_string(),
            FireStage::Middle => "~~".to_string(),
        },
        EntityKind::Bomb(bomb) if bomb.exploding => "XX".to_string(),
        EntityKind::Bomb(bomb) => format!("o{}", bomb.timer.min(9)),
        EntityKind::RandomBug(_) => "rb".to_string(),
        EntityKind::BlockBug(_) => "kb".to_string(),
        EntityKind::BomberBug(player) => format!("P{}", player.player_index + 1),
    }
}

/// The board as text, one line per row.
pub fn render_grid(world: &World) -> String {
    let grid = world.grid();
    let mut out = String::new();
    for row in 0..grid.rows() as i32 {
        for col in 0..grid.cols() as i32 {
            let symbol = world
                .entity_at(Location::new(row, col))
                .map(glyph)
                .unwrap_or_else(|| " .".to_string());
            let _ = write!(out, "{:<3}", symbol);
        }
        out.push('\n');
    }
    out
}

/// One status line per player.
pub fn render_players(game_state: &GameState) -> String {
    let world = game_state.world();
    let mut out = String::new();
    for id in game_state.players() {
        let Ok(player) = world.player(*id) else {
            continue;
        };
        let position = match world.location_of(*id) {
            Some(location) => location.to_string(),
            None => "dead".to_string(),
        };
        let _ = writeln!(
            out,
            "P{} {} bombs={} radius={} super={}",
            player.player_index + 1,
            position,
            player.max_bombs,
            player.bomb_radius,
            player.has_super_bomb
        );
    }
    out
}

pub fn print_grid(game_state: &GameState) {
    println!("--- Tick {} ---", game_state.ticks());
    print!("{}", render_grid(game_state.world()));
    print!("{}", render_players(game_state));
    println!();
}

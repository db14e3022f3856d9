//! Text-glyph rendering: the tile grid, live actors, the level title, and
//! the terminal banners.

use core::{Game, Pos, RunOutcome, TileKind};
use macroquad::prelude::*;

const FONT_SIZE: f32 = 32.0;
const CELL_W: f32 = FONT_SIZE * 0.6;
const CELL_H: f32 = FONT_SIZE;
const GRID_TOP: f32 = FONT_SIZE * 1.5;

fn tile_glyph(tile: TileKind) -> &'static str {
    match tile {
        TileKind::Wall => "#",
        TileKind::Floor => ".",
        TileKind::HealingFloor => "+",
    }
}

pub fn draw_game(game: &Game) {
    clear_background(BLACK);
    let state = game.state();

    draw_text(&format!("Level {}", state.level), CELL_W, FONT_SIZE, FONT_SIZE, WHITE);

    for y in 0..state.map.height {
        for x in 0..state.map.width {
            let tile = state.map.tile_at(Pos { y: y as i32, x: x as i32 });
            draw_cell(tile_glyph(tile), x, y, GRAY);
        }
    }

    for actor in state.live_actors() {
        let color = if actor.is_player { WHITE } else { RED };
        let mut buf = [0u8; 4];
        let glyph = actor.glyph().encode_utf8(&mut buf);
        draw_cell(glyph, actor.pos.x as usize, actor.pos.y as usize, color);
    }

    match game.outcome() {
        Some(RunOutcome::Defeat) => draw_banner("Game Over", RED),
        Some(RunOutcome::Victory) => draw_banner("Victory!", GREEN),
        None => {}
    }
}

fn draw_cell(glyph: &str, x: usize, y: usize, color: Color) {
    draw_text(glyph, x as f32 * CELL_W, GRID_TOP + (y as f32 + 1.0) * CELL_H, FONT_SIZE, color);
}

fn draw_banner(title: &str, color: Color) {
    let center_x = screen_width() / 2.0;
    let center_y = screen_height() / 2.0;

    let title_size = FONT_SIZE * 2.0;
    let title_dims = measure_text(title, None, title_size as u16, 1.0);
    draw_text(title, center_x - title_dims.width / 2.0, center_y, title_size, color);

    let hint = "press R to restart";
    let hint_dims = measure_text(hint, None, FONT_SIZE as u16, 1.0);
    draw_text(hint, center_x - hint_dims.width / 2.0, center_y + CELL_H, FONT_SIZE, color);
}

//! Shared helpers for in-crate engine tests: deterministic arenas with
//! hand-placed actors instead of randomly generated levels.

use crate::mapgen::{GRID_COLS, GRID_ROWS};
use crate::state::{Actor, Map};

use super::*;

/// A game whose level-1 state is flattened to an all-floor arena holding
/// only the player, parked at `player_pos` with `hp`.
pub(crate) fn arena_game(player_pos: Pos, hp: i32) -> Game {
    let mut game = Game::new(7);

    for id in game.state.roster.split_off(1) {
        if let Some(enemy) = game.state.actors.remove(id) {
            game.state.occupancy.clear(enemy.pos);
        }
    }
    game.state.living_enemies = 0;
    game.state.map = Map::new(GRID_COLS, GRID_ROWS, TileKind::Floor);

    let player_id = game.state.player_id;
    let old_pos = game.state.actors[player_id].pos;
    game.state.occupancy.clear(old_pos);
    game.state.actors[player_id].pos = player_pos;
    game.state.actors[player_id].hp = hp;
    game.state.occupancy.insert(player_pos, player_id);

    game
}

pub(crate) fn add_enemy(game: &mut Game, pos: Pos, hp: i32) -> EntityId {
    let id = game.state.actors.insert(Actor { id: EntityId::default(), pos, hp, is_player: false });
    game.state.actors[id].id = id;
    game.state.roster.push(id);
    game.state.occupancy.insert(pos, id);
    game.state.living_enemies += 1;
    id
}

pub(crate) fn set_tile(game: &mut Game, pos: Pos, tile: TileKind) {
    game.state.map.set_tile(pos, tile);
}

pub(crate) fn set_level(game: &mut Game, level: u8) {
    game.state.level = level;
}

pub(crate) fn finish_with(game: &mut Game, outcome: RunOutcome) {
    game.finished = Some(outcome);
}

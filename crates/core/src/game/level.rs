//! Level construction and progression.
//!
//! A level is one throwaway `GameState`: tile grid, actor roster, and
//! occupancy built together, replaced wholesale on every transition.

use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;

use crate::mapgen::{self, GRID_COLS, GRID_ROWS};
use crate::state::{Actor, GameState, Map, OccupancyIndex};

use super::*;

/// Map regeneration attempts before falling back to an all-floor arena.
const MAX_MAP_ATTEMPTS: u32 = 16;

pub(super) fn build_level(
    run_seed: u64,
    rng: &mut ChaCha8Rng,
    level: u8,
    target_actors: usize,
    player_hp: i32,
) -> GameState {
    let (map, spawns) = generate_populated_map(run_seed, rng, level, target_actors);

    let mut actors: SlotMap<EntityId, Actor> = SlotMap::with_key();
    let mut roster = Vec::with_capacity(spawns.len());
    let mut occupancy = OccupancyIndex::default();

    for (slot, pos) in spawns.iter().copied().enumerate() {
        let is_player = slot == 0;
        let hp = if is_player { player_hp } else { ENEMY_STARTING_HP };
        let id = actors.insert(Actor { id: EntityId::default(), pos, hp, is_player });
        actors[id].id = id;
        roster.push(id);
        occupancy.insert(pos, id);
    }

    let player_id = roster[0];
    GameState {
        map,
        actors,
        roster,
        player_id,
        occupancy,
        level,
        target_actors,
        living_enemies: target_actors - 1,
    }
}

/// Roll maps until one holds the full roster. A 10x15 grid with ~20% walls
/// essentially always fits on the first try; the arena fallback just keeps
/// construction total without a panic path.
fn generate_populated_map(
    run_seed: u64,
    rng: &mut ChaCha8Rng,
    level: u8,
    target_actors: usize,
) -> (Map, Vec<Pos>) {
    for attempt in 0..MAX_MAP_ATTEMPTS {
        let map = mapgen::generate_map(run_seed, level, attempt);
        let spawns = mapgen::roll_spawn_positions(rng, &map, target_actors);
        if spawns.len() == target_actors {
            return (map, spawns);
        }
    }

    let map = Map::new(GRID_COLS, GRID_ROWS, TileKind::Floor);
    let spawns = mapgen::roll_spawn_positions(rng, &map, target_actors);
    (map, spawns)
}

impl Game {
    /// Fired by the resolver when the last enemy of the level dies.
    pub(super) fn on_enemies_cleared(&mut self) {
        let cleared = self.state.level;
        self.log.push(LogEvent::LevelCleared { level: cleared });

        if cleared == MAX_LEVEL {
            self.finished = Some(RunOutcome::Victory);
            return;
        }

        let next_level = cleared + 1;
        let next_target = self.state.target_actors + ACTORS_PER_LEVEL_INCREMENT;
        let player_hp = self.state.actors[self.state.player_id].hp;
        self.state = build_level(self.seed, &mut self.rng, next_level, next_target, player_hp);
        self.log.push(LogEvent::LevelStarted { level: next_level });
    }
}

//! Random tile-grid generation and actor spawn placement.
//!
//! Generation is per-cell independent with no connectivity guarantee: a level
//! can legitimately box an actor in on all four sides, and the turn engine
//! has to cope with that rather than this module preventing it.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};

use crate::state::Map;
use crate::types::{Pos, TileKind};

pub const GRID_ROWS: usize = 10;
pub const GRID_COLS: usize = 15;

/// Random placement attempts per actor before the deterministic scan kicks in.
const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

/// Mix the run seed with the level and regeneration attempt so every map is
/// reproducible from the run seed alone.
pub(crate) fn derive_level_seed(run_seed: u64, level: u8, attempt: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (level as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= (attempt as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Uniform draw in [0, 1) from the top 53 bits of the stream.
fn unit_draw(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

fn wall_threshold(level: u8) -> f64 {
    0.8 + f64::from(level - 1) * 0.03
}

fn heal_threshold(level: u8) -> f64 {
    0.95 + f64::from(level - 1) * 0.01
}

/// Generate the 10x15 tile grid for one level.
///
/// A cell is Wall iff its draw exceeds the wall threshold; a surviving Floor
/// cell upgrades to HealingFloor iff a second draw exceeds the heal
/// threshold, so healing tiles get rarer on deeper levels.
pub fn generate_map(run_seed: u64, level: u8, attempt: u32) -> Map {
    debug_assert!(level >= 1);
    let mut rng = ChaCha8Rng::seed_from_u64(derive_level_seed(run_seed, level, attempt));
    let mut map = Map::new(GRID_COLS, GRID_ROWS, TileKind::Floor);
    for y in 0..map.height {
        for x in 0..map.width {
            let pos = Pos { y: y as i32, x: x as i32 };
            if unit_draw(&mut rng) > wall_threshold(level) {
                map.set_tile(pos, TileKind::Wall);
            } else if unit_draw(&mut rng) > heal_threshold(level) {
                map.set_tile(pos, TileKind::HealingFloor);
            }
        }
    }
    map
}

/// Pick `count` distinct spawn positions on open tiles.
///
/// Rejection sampling is capped per actor; exhaustion falls back to a
/// row-major scan for the first free open tile. The result is shorter than
/// `count` only when the map itself has too few open tiles, which the level
/// builder treats as a reason to regenerate.
pub fn roll_spawn_positions(rng: &mut ChaCha8Rng, map: &Map, count: usize) -> Vec<Pos> {
    let mut chosen: Vec<Pos> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = Pos {
                y: (rng.next_u64() % map.height as u64) as i32,
                x: (rng.next_u64() % map.width as u64) as i32,
            };
            if map.tile_at(pos).is_walkable() && !chosen.contains(&pos) {
                placed = Some(pos);
                break;
            }
        }
        match placed.or_else(|| first_free_open_tile(map, &chosen)) {
            Some(pos) => chosen.push(pos),
            None => break,
        }
    }
    chosen
}

fn first_free_open_tile(map: &Map, taken: &[Pos]) -> Option<Pos> {
    for y in 0..map.height {
        for x in 0..map.width {
            let pos = Pos { y: y as i32, x: x as i32 };
            if map.tile_at(pos).is_walkable() && !taken.contains(&pos) {
                return Some(pos);
            }
        }
    }
    None
}

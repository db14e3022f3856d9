//! The turn-synchronous game session.
//!
//! `Game` owns the current level's state, the session RNG, and the event
//! log, and runs one player action plus all enemy responses to completion
//! per accepted input. Submodules split the engine by concern: movement and
//! combat resolution, enemy decision making, and level construction.

mod ai;
mod level;
mod resolver;
#[cfg(test)]
pub(crate) mod test_support;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::state::GameState;
use crate::types::*;

pub const STARTING_ACTORS: usize = 5;
pub const ACTORS_PER_LEVEL_INCREMENT: usize = 2;
pub const MAX_LEVEL: u8 = 5;
pub const PLAYER_STARTING_HP: i32 = 3;
pub const PLAYER_MAX_HP: i32 = 9;
pub const ENEMY_STARTING_HP: i32 = 1;

/// Enemies farther than this Manhattan distance from the player wander.
const CHASE_RANGE: i32 = 6;

pub struct Game {
    seed: u64,
    turn: u64,
    rng: ChaCha8Rng,
    state: GameState,
    log: Vec<LogEvent>,
    next_input_seq: u64,
    finished: Option<RunOutcome>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = level::build_level(seed, &mut rng, 1, STARTING_ACTORS, PLAYER_STARTING_HP);
        Self {
            seed,
            turn: 0,
            rng,
            state,
            log: vec![LogEvent::LevelStarted { level: 1 }],
            next_input_seq: 0,
            finished: None,
        }
    }

    /// Run one full turn: the player's move and, when it acted, one action
    /// per living enemy. Finished games ignore input until a restart.
    ///
    /// A geometry-blocked player move does not consume the turn; the caller
    /// is free to retry with another direction.
    pub fn player_turn(&mut self, direction: Direction) -> TurnReport {
        if self.finished.is_some() {
            return TurnReport { player_action: MoveOutcome::Blocked, outcome: self.finished };
        }

        let player_id = self.state.player_id;
        let player_action = self.attempt_move(player_id, direction);

        if player_action.acted() {
            // A level clear replaces the whole roster mid-action; the fresh
            // enemies take this turn's enemy phase, so the player can be
            // attacked on arrival.
            if self.finished.is_none() {
                self.enemies_act();
            }
            self.turn += 1;
            self.next_input_seq += 1;
        }

        TurnReport { player_action, outcome: self.finished }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_turn(&self) -> u64 {
        self.turn
    }

    /// Sequence number the next accepted input will get in the journal.
    pub fn next_input_seq(&self) -> u64 {
        self.next_input_seq
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.finished
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Determinism fingerprint over everything the replay layer compares:
    /// seed, turn, level, enemy accounting, and live actors in roster order.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        hasher.write_u8(self.state.level);
        hasher.write_u64(self.state.living_enemies as u64);
        for actor in self.state.live_actors() {
            hasher.write_i32(actor.pos.y);
            hasher.write_i32(actor.pos.x);
            hasher.write_i32(actor.hp);
        }
        hasher.finish()
    }
}

pub mod game;
pub mod journal;
pub mod journal_file;
pub mod mapgen;
pub mod replay;
pub mod state;
pub mod types;

pub use game::{Game, MAX_LEVEL, PLAYER_MAX_HP, PLAYER_STARTING_HP, STARTING_ACTORS};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use state::{Actor, GameState, Map, OccupancyIndex};
pub use types::*;

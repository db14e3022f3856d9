use serde::{Deserialize, Serialize};

use crate::types::Direction;

/// Everything needed to reproduce a run: the seed plus every accepted move
/// in order. Blocked attempts are never journaled because they consume no
/// turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    Move { direction: Direction },
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: 1, build_id: "dev".to_string(), seed, inputs: Vec::new() }
    }

    pub fn append_move(&mut self, direction: Direction, seq: u64) {
        self.inputs.push(InputRecord { seq, payload: InputPayload::Move { direction } });
    }
}

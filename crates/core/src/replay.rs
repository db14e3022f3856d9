use crate::game::Game;
use crate::journal::{InputJournal, InputPayload};
use crate::types::RunOutcome;

#[derive(Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// A journaled move was rejected by the engine: the journal does not
    /// match the world its seed generates.
    InputRejected { seq: u64 },
    /// Moves remained after the run finished.
    TrailingInput { seq: u64 },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_outcome: Option<RunOutcome>,
    pub final_snapshot_hash: u64,
    pub final_turn: u64,
}

/// Rebuild the run from its journal. Every record must land as an accepted
/// action; anything else is a desync.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::new(journal.seed);

    for record in &journal.inputs {
        if game.outcome().is_some() {
            return Err(ReplayError::TrailingInput { seq: record.seq });
        }
        let InputPayload::Move { direction } = record.payload;
        let report = game.player_turn(direction);
        if !report.player_action.acted() {
            return Err(ReplayError::InputRejected { seq: record.seq });
        }
    }

    Ok(ReplayResult {
        final_outcome: game.outcome(),
        final_snapshot_hash: game.snapshot_hash(),
        final_turn: game.current_turn(),
    })
}

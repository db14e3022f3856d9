//! Frame-level application state: feeds captured input to the game session
//! and queues accepted moves for the journal writer.

use core::journal::InputPayload;
use core::{Direction, Game, RunOutcome};

/// What the keyboard produced this frame, already mapped away from key codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCommands {
    pub direction: Option<Direction>,
    pub restart: bool,
}

/// An input the simulation accepted this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedInput {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Playing,
    Finished(RunOutcome),
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Drained by the caller after each tick to persist to the journal file.
    pub accepted_inputs: Vec<AcceptedInput>,
    pub restart_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame's input against the game. Directional input only
    /// counts while playing; once a banner is up, only restart gets through.
    pub fn tick(&mut self, game: &mut Game, commands: FrameCommands) {
        self.accepted_inputs.clear();
        self.restart_requested = false;

        match self.mode {
            AppMode::Playing => {
                let Some(direction) = commands.direction else {
                    return;
                };
                let seq = game.next_input_seq();
                let report = game.player_turn(direction);
                if report.player_action.acted() {
                    self.accepted_inputs
                        .push(AcceptedInput { seq, payload: InputPayload::Move { direction } });
                }
                if let Some(outcome) = report.outcome {
                    self.mode = AppMode::Finished(outcome);
                }
            }
            AppMode::Finished(_) => {
                self.restart_requested = commands.restart;
            }
        }
    }
}

mod frame_input;
mod ui_render;

use std::path::Path;

use app::app_loop::AppState;
use app::seed;
use core::Game;
use core::journal_file::JournalWriter;
use macroquad::prelude::next_frame;

#[macroquad::main("Grid Roguelike")]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let parsed = match seed::parse_args(&args, seed::generate_runtime_seed()) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            return;
        }
    };

    let run_seed = parsed.seed.value();
    let mut game = Game::new(run_seed);
    let mut app_state = AppState::new();
    let mut journal = open_journal(parsed.journal_path.as_deref(), run_seed);

    loop {
        let commands = frame_input::capture_frame_commands();
        app_state.tick(&mut game, commands);

        let mut journal_failed = false;
        if let Some(writer) = journal.as_mut() {
            for accepted in &app_state.accepted_inputs {
                if let Err(error) = writer.append(&accepted.payload) {
                    eprintln!("journal write failed: {error}");
                    journal_failed = true;
                    break;
                }
            }
        }
        if journal_failed {
            journal = None;
        }

        if app_state.restart_requested {
            let fresh_seed = seed::generate_runtime_seed();
            game = Game::new(fresh_seed);
            app_state = AppState::new();
            journal = open_journal(parsed.journal_path.as_deref(), fresh_seed);
        }

        ui_render::draw_game(&game);
        next_frame().await
    }
}

fn open_journal(path: Option<&Path>, seed: u64) -> Option<JournalWriter> {
    let path = path?;
    match JournalWriter::create(path, seed, env!("CARGO_PKG_VERSION")) {
        Ok(writer) => Some(writer),
        Err(error) => {
            eprintln!("could not create journal file: {error}");
            None
        }
    }
}

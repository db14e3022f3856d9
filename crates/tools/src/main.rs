//! Headless replay runner: load a recorded journal file and replay it to
//! completion, printing the final turn, outcome, and snapshot hash.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::journal_file::load_journal;
use game_core::replay::replay_to_end;

#[derive(Parser)]
#[command(author, version, about = "Replay a recorded input journal", long_about = None)]
struct Args {
    /// Path to the JSONL journal file to replay
    #[arg(short, long)]
    journal: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let journal = load_journal(&args.journal)
        .with_context(|| format!("failed to load journal file: {}", args.journal.display()))?;

    let result = replay_to_end(&journal)
        .map_err(|error| anyhow::anyhow!("replay desynced: {error:?}"))?;

    println!("Replay complete.");
    println!("Seed: {}", journal.seed);
    println!("Final turn: {}", result.final_turn);
    println!("Outcome: {:?}", result.final_outcome);
    println!("Snapshot hash: {}", result.final_snapshot_hash);

    Ok(())
}

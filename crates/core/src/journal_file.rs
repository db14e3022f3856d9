//! File-backed JSONL journal with a SHA-256 hash chain for crash recovery.
//!
//! The format is line-delimited JSON:
//! - Line 1: header with `format_version`, `build_id`, `seed`.
//! - Lines 2+: one record per accepted input, each carrying a SHA-256 hash
//!   chain (`prev_sha256_hex`, `sha256_hex`) for corruption detection.
//!
//! Writing flushes each record immediately so the file survives crashes.
//! Loading validates every line's JSON shape and hash chain, stopping at the
//! first invalid or incomplete line and returning what came before it.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::journal::{InputJournal, InputPayload, InputRecord};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    build_id: String,
    seed: u64,
}

/// Fields hashed for a record: serialized to JSON and concatenated with
/// `prev_sha256_hex` as the SHA-256 input.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    payload: &'a InputPayload,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    payload: InputPayload,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash seed for the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    let digest = hasher.finalize();
    format!("{digest:064x}")
}

/// Appends accepted inputs to a JSONL file, one flushed line per record.
pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Create a new journal file, writing the header line immediately.
    pub fn create(path: &Path, seed: u64, build_id: &str) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header = FileHeader { format_version: 1, build_id: build_id.to_string(), seed };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    /// Append one accepted input, returning its sequence number.
    pub fn append(&mut self, payload: &InputPayload) -> io::Result<u64> {
        let seq = self.next_seq;
        let body = RecordBody { seq, payload };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let record = FileRecord {
            seq,
            payload: payload.clone(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let line = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        Ok(seq)
    }
}

/// Load a journal file, truncating at the first line that fails validation.
pub fn load_journal(path: &Path) -> io::Result<InputJournal> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines();

    let Some(header_line) = lines.next() else {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "journal file is empty"));
    };
    let header: FileHeader = serde_json::from_str(header_line)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "malformed journal header"))?;

    let mut journal = InputJournal::new(header.seed);
    journal.format_version = header.format_version;
    journal.build_id = header.build_id;

    let mut prev_hash = INITIAL_HASH.to_string();
    let mut expected_seq = 0u64;
    for line in lines {
        let Ok(record) = serde_json::from_str::<FileRecord>(line) else {
            break;
        };
        if record.seq != expected_seq || record.prev_sha256_hex != prev_hash {
            break;
        }
        let body = RecordBody { seq: record.seq, payload: &record.payload };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        if compute_record_sha256(&body_json, &prev_hash) != record.sha256_hex {
            break;
        }

        prev_hash = record.sha256_hex;
        expected_seq += 1;
        journal.inputs.push(InputRecord { seq: record.seq, payload: record.payload });
    }

    Ok(journal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn sample_moves() -> Vec<InputPayload> {
        vec![
            InputPayload::Move { direction: Direction::Right },
            InputPayload::Move { direction: Direction::Down },
            InputPayload::Move { direction: Direction::Left },
        ]
    }

    fn write_journal(path: &Path, seed: u64, moves: &[InputPayload]) {
        let mut writer = JournalWriter::create(path, seed, "test").expect("create journal");
        for (i, payload) in moves.iter().enumerate() {
            let seq = writer.append(payload).expect("append record");
            assert_eq!(seq, i as u64);
        }
    }

    #[test]
    fn journal_file_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.jsonl");
        let moves = sample_moves();
        write_journal(&path, 4242, &moves);

        let journal = load_journal(&path).expect("load journal");

        assert_eq!(journal.seed, 4242);
        assert_eq!(journal.build_id, "test");
        assert_eq!(journal.inputs.len(), moves.len());
        for (record, payload) in journal.inputs.iter().zip(&moves) {
            assert_eq!(&record.payload, payload);
        }
    }

    #[test]
    fn tampered_record_truncates_the_chain() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.jsonl");
        write_journal(&path, 1, &sample_moves());

        let text = fs::read_to_string(&path).expect("read back");
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        // Flip the second record's payload without recomputing its hash.
        lines[2] = lines[2].replace("Down", "Up");
        fs::write(&path, lines.join("\n")).expect("rewrite");

        let journal = load_journal(&path).expect("load journal");
        assert_eq!(journal.inputs.len(), 1, "records after the tamper are dropped");
    }

    #[test]
    fn truncated_trailing_line_is_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.jsonl");
        write_journal(&path, 1, &sample_moves());

        let text = fs::read_to_string(&path).expect("read back");
        // Simulate a crash mid-write of the final record.
        let cut = text.len() - 10;
        fs::write(&path, &text[..cut]).expect("rewrite");

        let journal = load_journal(&path).expect("load journal");
        assert_eq!(journal.inputs.len(), 2);
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.jsonl");
        fs::write(&path, "").expect("write empty");

        assert!(load_journal(&path).is_err());
    }
}

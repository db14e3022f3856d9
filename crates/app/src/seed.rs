//! Run configuration from the command line: seed selection plus an optional
//! journal file path, with a time/pid entropy fallback for the seed.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppArgs {
    pub seed: SeedChoice,
    pub journal_path: Option<PathBuf>,
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Parse `--seed <n>` / `--seed=<n>` and `--journal <path>` / `--journal=<path>`.
/// Unknown arguments are ignored so the game keeps launching from wrappers
/// that inject their own flags.
pub fn parse_args(args: &[String], generated_seed: u64) -> Result<AppArgs, String> {
    let mut seed = None;
    let mut journal_path = None;
    let mut index = 1usize;

    while index < args.len() {
        if let Some(value) = flag_value(args, &mut index, "--seed")? {
            if seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            seed = Some(parse_seed_value(&value)?);
            continue;
        }
        if let Some(value) = flag_value(args, &mut index, "--journal")? {
            if journal_path.is_some() {
                return Err("journal path provided more than once".to_string());
            }
            journal_path = Some(PathBuf::from(value));
            continue;
        }

        index += 1;
    }

    Ok(AppArgs {
        seed: match seed {
            Some(seed) => SeedChoice::Cli(seed),
            None => SeedChoice::Generated(generated_seed),
        },
        journal_path,
    })
}

/// If `args[index]` carries `flag`, consume it (and its value) and return the
/// value; otherwise leave `index` untouched.
fn flag_value(args: &[String], index: &mut usize, flag: &str) -> Result<Option<String>, String> {
    let argument = args[*index].as_str();

    if argument == flag {
        let Some(value) = args.get(*index + 1) else {
            return Err(format!("missing value for {flag}"));
        };
        *index += 2;
        return Ok(Some(value.clone()));
    }

    if let Some(value) = argument.strip_prefix(flag)
        && let Some(value) = value.strip_prefix('=')
    {
        *index += 1;
        return Ok(Some(value.to_string()));
    }

    Ok(None)
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn uses_generated_seed_when_seed_flag_is_absent() {
        let args = as_args(&["game"]);
        let parsed = parse_args(&args, 9_876_543).expect("parse");
        assert_eq!(parsed.seed, SeedChoice::Generated(9_876_543));
        assert_eq!(parsed.journal_path, None);
    }

    #[test]
    fn parses_seed_flag_with_separate_value() {
        let args = as_args(&["game", "--seed", "4242"]);
        let parsed = parse_args(&args, 1).expect("parse");
        assert_eq!(parsed.seed, SeedChoice::Cli(4_242));
    }

    #[test]
    fn parses_seed_flag_with_inline_value() {
        let args = as_args(&["game", "--seed=2026"]);
        let parsed = parse_args(&args, 1).expect("parse");
        assert_eq!(parsed.seed, SeedChoice::Cli(2_026));
    }

    #[test]
    fn parses_journal_path_alongside_seed() {
        let args = as_args(&["game", "--journal=run.jsonl", "--seed", "7"]);
        let parsed = parse_args(&args, 1).expect("parse");
        assert_eq!(parsed.seed, SeedChoice::Cli(7));
        assert_eq!(parsed.journal_path, Some(PathBuf::from("run.jsonl")));
    }

    #[test]
    fn errors_when_seed_flag_has_no_value() {
        let args = as_args(&["game", "--seed"]);
        let err = parse_args(&args, 1).expect_err("missing value should error");
        assert!(err.contains("missing"), "error should explain missing value: {err}");
    }

    #[test]
    fn errors_when_seed_value_is_not_a_number() {
        let args = as_args(&["game", "--seed=abc"]);
        let err = parse_args(&args, 1).expect_err("non-numeric seed should error");
        assert!(err.contains("number"), "error should explain numeric requirement: {err}");
    }

    #[test]
    fn errors_when_seed_is_provided_more_than_once() {
        let args = as_args(&["game", "--seed=1", "--seed", "2"]);
        let err = parse_args(&args, 1).expect_err("duplicate seed should be rejected");
        assert!(err.contains("more than once"), "error should explain duplicate: {err}");
    }

    #[test]
    fn unknown_arguments_are_ignored() {
        let args = as_args(&["game", "--fullscreen", "--seed", "9"]);
        let parsed = parse_args(&args, 1).expect("parse");
        assert_eq!(parsed.seed, SeedChoice::Cli(9));
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}

use std::num::NonZeroU64;
use std::time::Duration;

use clap::{ArgAction, Parser};
use refill_fetch::data::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_STALLED_ATTEMPTS};
use refill_fetch::{FetchOptions, Timeouts};
use refill_verify::{ExpectedDigest, VerifyError};

pub const DEFAULT_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug, Parser)]
#[command(name = "refill", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Expected SHA-256 of the payload as hex; absent or empty skips the check
    pub reference: Option<String>,

    #[arg(long, default_value = DEFAULT_URL, help = "URL of the resource to download")]
    pub url: String,

    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, help = "Maximum bytes per range request")]
    pub chunk_size: NonZeroU64,

    #[arg(long, default_value_t = 500, help = "Delay between range requests, in milliseconds")]
    pub pacing_ms: u64,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_STALLED_ATTEMPTS,
        help = "Consecutive empty range responses before giving up"
    )]
    pub max_stalled: u32,

    #[arg(long, help = "Wall-clock budget for the backfill, in seconds")]
    pub time_budget_secs: Option<u64>,

    #[arg(long, default_value_t = 30)]
    pub connect_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    pub read_timeout_secs: u64,

    #[arg(long, help = "Print a JSON summary instead of progress lines")]
    pub json: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

impl App {
    /// The reference digest, if one was given.
    ///
    /// An empty argument counts as absent.
    pub fn reference(&self) -> Result<Option<ExpectedDigest>, VerifyError> {
        self.reference
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ExpectedDigest::from_hex)
            .transpose()
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
            .chunk_size(self.chunk_size)
            .pacing(Duration::from_millis(self.pacing_ms))
            .max_stalled_attempts(self.max_stalled)
            .time_budget(self.time_budget_secs.map(Duration::from_secs))
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read:    Duration::from_secs(self.read_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn parse(args: &[&str]) -> App {
        App::try_parse_from(std::iter::once("refill").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let app = parse(&[]);

        assert_eq!(app.url, DEFAULT_URL);
        assert_eq!(app.chunk_size.get(), 65536);
        assert_eq!(app.pacing_ms, 500);
        assert_eq!(app.max_stalled, 8);
        assert!(app.time_budget_secs.is_none());
        assert!(!app.json);
        assert!(app.reference().unwrap().is_none());
    }

    #[test]
    fn test_reference_argument() {
        let app = parse(&[DIGEST]);
        assert_eq!(app.reference().unwrap().unwrap().to_string(), DIGEST);

        let upper = DIGEST.to_uppercase();
        let app = parse(&[upper.as_str()]);
        assert_eq!(app.reference().unwrap().unwrap().to_string(), DIGEST);
    }

    #[test]
    fn test_empty_reference_skips_check() {
        assert!(parse(&[""]).reference().unwrap().is_none());
        assert!(parse(&["  "]).reference().unwrap().is_none());
    }

    #[test]
    fn test_malformed_reference_is_rejected() {
        assert!(matches!(
            parse(&["not-a-digest"]).reference(),
            Err(VerifyError::InvalidDigest(_))
        ));
    }

    #[test]
    fn test_options_from_flags() {
        let app = parse(&[
            "--chunk-size",
            "3",
            "--pacing-ms",
            "0",
            "--max-stalled",
            "2",
            "--time-budget-secs",
            "60",
            "--read-timeout-secs",
            "5",
            "-vv",
        ]);

        let options = app.fetch_options();
        assert_eq!(options.chunk_size.get(), 3);
        assert_eq!(options.pacing, Duration::ZERO);
        assert_eq!(options.max_stalled_attempts, 2);
        assert_eq!(options.time_budget, Some(Duration::from_secs(60)));
        assert_eq!(app.timeouts().read, Duration::from_secs(5));
        assert_eq!(app.verbose, 2);
    }

    #[test]
    fn test_zero_chunk_size_is_a_usage_error() {
        assert!(App::try_parse_from(["refill", "--chunk-size", "0"]).is_err());
    }
}

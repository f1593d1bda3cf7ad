use std::sync::Arc;

use refill_fetch::{FetchPhase, Progress, VerificationOutcome, VerifiedDownload};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// progress lines or the JSON summary.
///
/// `RUST_LOG` wins over `-v` when set.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// The human-readable line for a progress event, if it warrants one.
pub fn progress_line(progress: &Progress) -> Option<String> {
    match progress.phase {
        FetchPhase::Probing => Some(format!(
            "Declared length: {} bytes.",
            progress.total_bytes.unwrap_or(0)
        )),
        FetchPhase::Fetching if progress.is_complete() => Some("Data is not glitchy.".to_string()),
        FetchPhase::Fetching => Some(format!(
            "Received data partially ({} out of {} bytes).",
            progress.bytes_downloaded,
            progress.total_bytes.unwrap_or(0)
        )),
        FetchPhase::Backfilling => progress
            .range
            .map(|range| format!("Requesting range: {} - {}", range.start(), range.end())),
        FetchPhase::Verifying | FetchPhase::Completed => None,
    }
}

pub fn progress_printer() -> Arc<dyn Fn(&Progress) + Send + Sync> {
    Arc::new(|progress: &Progress| {
        if let Some(line) = progress_line(progress) {
            println!("{line}");
        }
    })
}

pub fn digest_line(hex: &str) -> String { format!("SHA-256 of the whole data: {hex}") }

pub fn outcome_line(outcome: VerificationOutcome) -> &'static str {
    match outcome {
        VerificationOutcome::NoReferenceProvided => {
            "No reference hash was given, no final check was performed."
        }
        VerificationOutcome::Match => "Hashes match! Received data is correct.",
        VerificationOutcome::Mismatch => "Hashes do NOT match!",
    }
}

/// Machine-readable result of a run.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub url:             &'a str,
    pub declared_length: u64,
    pub initial_length:  u64,
    pub range_requests:  usize,
    pub length:          u64,
    pub sha256:          String,
    pub outcome:         &'static str,
}

impl<'a> Summary<'a> {
    pub fn new(url: &'a str, verified: &VerifiedDownload) -> Self {
        let download = &verified.download;
        Self {
            url,
            declared_length: download.declared_length,
            initial_length: download.initial_length,
            range_requests: download.ranges.len(),
            length: download.len(),
            sha256: verified.verification.digest.to_hex(),
            outcome: match verified.verification.outcome {
                VerificationOutcome::NoReferenceProvided => "no_reference",
                VerificationOutcome::Match => "match",
                VerificationOutcome::Mismatch => "mismatch",
            },
        }
    }
}

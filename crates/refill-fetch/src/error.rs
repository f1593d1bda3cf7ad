//! Error types for refill-fetch.

use std::fmt;
use std::time::Duration;

use refill_verify::VerifyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backfill stalled at byte {offset} of {declared_length}: {reason}")]
    StalledBackfill {
        offset:          u64,
        declared_length: u64,
        reason:          StallReason,
    },

    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("verification failed: {0}")]
    Verify(#[source] VerifyError),
}

/// Why the backfill loop gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallReason {
    /// Consecutive range responses returned no bytes.
    NoProgress { attempts: u32 },
    /// The wall-clock budget ran out.
    TimeBudget { budget: Duration },
}

impl fmt::Display for StallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StallReason::NoProgress { attempts } => {
                write!(f, "{attempts} consecutive range responses made no progress")
            }
            StallReason::TimeBudget { budget } => {
                write!(f, "time budget of {budget:?} exhausted")
            }
        }
    }
}

impl From<VerifyError> for FetchError {
    fn from(e: VerifyError) -> Self {
        match e {
            VerifyError::HashMismatch { expected, actual } => {
                FetchError::HashMismatch { expected, actual }
            }
            other => FetchError::Verify(other),
        }
    }
}

impl FetchError {
    /// Flatten a transport error and its source chain into [`FetchError::Transport`].
    pub fn transport<E: std::error::Error>(e: E) -> Self {
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        FetchError::Transport(message)
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

use std::process::ExitCode;

use refill_fetch::FetchError;
use refill_verify::VerifyError;

/// Process exit statuses, distinct per failure class for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success   = 0,
    Failure   = 1,
    Usage     = 2,
    Transport = 3,
    Stalled   = 4,
    Mismatch  = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self { ExitCode::from(exit as u8) }
}

/// Map the root cause of `err` to its exit status.
pub fn classify(err: &anyhow::Error) -> Exit {
    for cause in err.chain() {
        if let Some(fetch) = cause.downcast_ref::<FetchError>() {
            return match fetch {
                FetchError::Transport(_) => Exit::Transport,
                FetchError::StalledBackfill { .. } => Exit::Stalled,
                FetchError::HashMismatch { .. } => Exit::Mismatch,
                FetchError::Verify(_) => Exit::Failure,
            };
        }
        if let Some(verify) = cause.downcast_ref::<VerifyError>() {
            return match verify {
                VerifyError::InvalidDigest(_) => Exit::Usage,
                VerifyError::HashMismatch { .. } => Exit::Mismatch,
                VerifyError::IllegalLength(_) => Exit::Failure,
            };
        }
    }
    Exit::Failure
}

use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::Duration;

use super::progress::Progress;

/// Phases of a download operation.
///
/// Downloads progress through these phases in order:
/// Probing → Fetching → Backfilling → Verifying → Completed
///
/// Backfilling is skipped when the initial fetch is already complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Asking the server for the declared length.
    #[default]
    Probing,

    /// The unconditional initial GET.
    Fetching,

    /// Issuing range requests for the missing suffix.
    ///
    /// One progress event is reported per range request, before it is sent.
    Backfilling,

    /// Computing and comparing the SHA-256 digest.
    Verifying,

    /// Download completed successfully.
    Completed,
}

impl std::fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchPhase::Probing => write!(f, "Probing"),
            FetchPhase::Fetching => write!(f, "Fetching"),
            FetchPhase::Backfilling => write!(f, "Backfilling"),
            FetchPhase::Verifying => write!(f, "Verifying"),
            FetchPhase::Completed => write!(f, "Completed"),
        }
    }
}

pub const DEFAULT_CHUNK_SIZE: NonZeroU64 = NonZeroU64::new(64 * 1024).unwrap();

pub const DEFAULT_MAX_STALLED_ATTEMPTS: u32 = 8;

/// Configuration for the backfill loop.
///
/// # Examples
///
/// ```
/// use refill_fetch::FetchOptions;
/// use std::num::NonZeroU64;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .chunk_size(NonZeroU64::new(3).unwrap())
///     .pacing(Duration::from_millis(500))
///     .time_budget(Some(Duration::from_secs(60)));
/// ```
#[derive(Clone)]
pub struct FetchOptions {
    /// Maximum number of bytes asked for by a single range request.
    ///
    /// Ranges are clipped to the declared length, so the last request may be
    /// smaller.
    ///
    /// Default: 65536
    pub chunk_size: NonZeroU64,

    /// Delay inserted between consecutive range requests.
    ///
    /// Default: zero
    pub pacing: Duration,

    /// Number of consecutive range responses without a single new byte after
    /// which the backfill is declared stalled. Values below 1 behave as 1.
    ///
    /// Default: 8
    pub max_stalled_attempts: u32,

    /// Wall-clock budget for the whole backfill loop, pacing included.
    ///
    /// Default: None (unbounded; the stall counter still applies)
    pub time_budget: Option<Duration>,

    /// Progress callback invoked on phase transitions and before every range
    /// request.
    ///
    /// Default: None
    pub on_progress: Option<Arc<dyn Fn(&Progress) + Send + Sync>>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("chunk_size", &self.chunk_size)
            .field("pacing", &self.pacing)
            .field("max_stalled_attempts", &self.max_stalled_attempts)
            .field("time_budget", &self.time_budget)
            .field("on_progress", &"{ ... }")
            .finish()
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            chunk_size:           DEFAULT_CHUNK_SIZE,
            pacing:               Duration::ZERO,
            max_stalled_attempts: DEFAULT_MAX_STALLED_ATTEMPTS,
            time_budget:          None,
            on_progress:          None,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: NonZeroU64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn max_stalled_attempts(mut self, attempts: u32) -> Self {
        self.max_stalled_attempts = attempts;
        self
    }

    #[must_use]
    pub fn time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    /// Set the progress callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use refill_fetch::{FetchOptions, FetchPhase, Progress};
    /// use std::sync::Arc;
    ///
    /// let options = FetchOptions::default().on_progress(Arc::new(|progress: &Progress| {
    ///     if progress.phase == FetchPhase::Backfilling {
    ///         if let Some(range) = progress.range {
    ///             println!("requesting bytes {range}");
    ///         }
    ///     }
    /// }));
    /// ```
    #[must_use]
    pub fn on_progress(mut self, on_progress: Arc<dyn Fn(&Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(on_progress);
        self
    }
}

/// Socket-level timeouts applied by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read:    Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(30),
            read:    Duration::from_secs(30),
        }
    }
}

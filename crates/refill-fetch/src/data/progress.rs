use crate::data::chunk::ByteRange;
use crate::data::options::FetchPhase;

/// Represents the current state of a download operation.
///
/// This struct is passed to progress callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Current phase of the download.
    pub phase: FetchPhase,

    /// Bytes accumulated so far.
    pub bytes_downloaded: u64,

    /// Declared total, once the length oracle has answered.
    pub total_bytes: Option<u64>,

    /// The range about to be requested (Backfilling only).
    pub range: Option<ByteRange>,

    /// Range requests issued so far, including the one in `range`.
    pub attempt: u32,
}

impl Progress {
    pub fn new(phase: FetchPhase, bytes_downloaded: u64, total_bytes: Option<u64>) -> Self {
        Self {
            phase,
            bytes_downloaded,
            total_bytes,
            range: None,
            attempt: 0,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: ByteRange, attempt: u32) -> Self {
        self.range = Some(range);
        self.attempt = attempt;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.total_bytes
            .is_some_and(|total| self.bytes_downloaded >= total)
    }
}

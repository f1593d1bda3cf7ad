use bytes::Bytes;
use refill_verify::Verification;

use crate::data::chunk::ByteRange;

/// A fully assembled payload and how it was put together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Length reported by the length oracle (0 when unavailable).
    pub declared_length: u64,

    /// Bytes delivered by the initial, unconditional GET.
    pub initial_length: u64,

    /// Every range requested during backfill, in request order.
    pub ranges: Vec<ByteRange>,

    pub payload: Bytes,
}

impl Download {
    pub fn len(&self) -> u64 { self.payload.len() as u64 }

    pub fn is_empty(&self) -> bool { self.payload.is_empty() }
}

/// A download together with its integrity verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedDownload {
    pub download:     Download,
    pub verification: Verification,
}

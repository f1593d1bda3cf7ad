//! HTTP downloading that survives truncated ("glitchy") responses.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations (range arithmetic, stall accounting)
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Pipeline
//!
//! 1. **Length oracle**: one exchange reports the declared `Content-Length`.
//! 2. **Initial fetch**: one unconditional GET, which may come back short.
//! 3. **Backfill**: `Range` requests anchored at the current offset until the
//!    accumulated length reaches the declared length.
//! 4. **Verification**: SHA-256 over the assembled payload via `refill-verify`.
//!
//! The oracle and the initial fetch are independent exchanges. The resource is
//! assumed not to change for the duration of a run.

pub mod core;
pub mod data;
mod effects;
mod error;

pub use self::core::{StallGuard, next_range, parse_content_length};
pub use self::data::{
    Accumulator, ByteRange, Chunk, Download, FetchOptions, FetchPhase, Progress, Timeouts,
    VerifiedDownload,
};
pub use self::effects::{Fetcher, HttpClient};

#[cfg(feature = "reqwest")]
pub use self::effects::ReqwestClient;

pub use self::error::{FetchError, Result, StallReason};

pub use refill_verify::{ExpectedDigest, Sha256Digest, Verification, VerificationOutcome};

//! Immutable data types for backfilled downloads.
//!
//! This module contains the configuration types, the byte containers passed
//! between the pipeline stages, and the progress structures handed to
//! callbacks.

pub mod chunk;
pub mod options;
pub mod progress;
pub mod report;

pub use chunk::{Accumulator, ByteRange, Chunk};
pub use options::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_STALLED_ATTEMPTS, FetchOptions, FetchPhase, Timeouts,
};
pub use progress::Progress;
pub use report::{Download, VerifiedDownload};

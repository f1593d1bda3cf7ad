//! Pure transformations for the backfill loop.
//!
//! Nothing in this module performs I/O: range arithmetic, header parsing and
//! stall accounting are plain functions and values, so the loop in
//! [`crate::effects`] stays a thin driver around them.

mod length;
mod range;
mod retry;
mod stall;

pub use length::{declared_or_zero, parse_content_length};
pub use range::next_range;
pub use retry::retry_delay;
pub use stall::StallGuard;

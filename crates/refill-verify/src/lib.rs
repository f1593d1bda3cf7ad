//! Integrity verification for backfilled downloads.
//!
//! Computes a SHA-256 digest over a completed payload and compares it with an
//! optional caller-supplied reference.
//!
//! # Example
//!
//! ```
//! use refill_verify::{ExpectedDigest, VerificationOutcome, verify};
//!
//! let expected = ExpectedDigest::from_hex(
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
//! )
//! .unwrap();
//!
//! let verification = verify(b"", Some(&expected));
//! assert_eq!(verification.outcome, VerificationOutcome::Match);
//! ```

pub use self::error::{Result, VerifyError};
pub use self::hasher::{DigestHasher, Hasher, Sha256Hasher};
pub use self::outcome::{Verification, VerificationOutcome, verify};
pub use self::sha256::{ExpectedDigest, SHA256_LEN, Sha256Digest};

mod error;
mod hasher;
mod outcome;
mod sha256;

use std::fmt;

use crate::sha256::{ExpectedDigest, Sha256Digest};
use crate::{Result, VerifyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// No reference digest was supplied; nothing to compare.
    NoReferenceProvided,
    Match,
    Mismatch,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::NoReferenceProvided => write!(f, "no reference provided"),
            VerificationOutcome::Match => write!(f, "match"),
            VerificationOutcome::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// Result of hashing a completed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub digest:   Sha256Digest,
    pub expected: Option<ExpectedDigest>,
    pub outcome:  VerificationOutcome,
}

impl Verification {
    /// Turn a mismatch into [`VerifyError::HashMismatch`].
    pub fn into_result(self) -> Result<Self> {
        match (&self.outcome, &self.expected) {
            (VerificationOutcome::Mismatch, Some(expected)) => Err(VerifyError::HashMismatch {
                expected: expected.to_string(),
                actual:   self.digest.to_hex(),
            }),
            _ => Ok(self),
        }
    }
}

pub fn verify(bytes: &[u8], reference: Option<&ExpectedDigest>) -> Verification {
    let digest = Sha256Digest::of(bytes);
    let outcome = match reference {
        None => VerificationOutcome::NoReferenceProvided,
        Some(expected) if expected.matches(&digest) => VerificationOutcome::Match,
        Some(_) => VerificationOutcome::Mismatch,
    };

    Verification {
        digest,
        expected: reference.cloned(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_reference_is_not_an_error() {
        let verification = verify(b"payload", None);

        assert_eq!(verification.outcome, VerificationOutcome::NoReferenceProvided);
        assert!(verification.into_result().is_ok());
    }

    #[test]
    fn test_match() {
        let expected = ExpectedDigest::from_hex(&Sha256Digest::of(b"payload").to_hex()).unwrap();
        let verification = verify(b"payload", Some(&expected));

        assert_eq!(verification.outcome, VerificationOutcome::Match);
        assert!(verification.into_result().is_ok());
    }

    #[test]
    fn test_mismatch_is_surfaced() {
        let expected = ExpectedDigest::from_hex(&"00".repeat(32)).unwrap();
        let verification = verify(b"payload", Some(&expected));

        assert_eq!(verification.outcome, VerificationOutcome::Mismatch);
        match verification.into_result() {
            Err(VerifyError::HashMismatch { expected, actual }) => {
                assert_eq!(expected, "00".repeat(32));
                assert_eq!(actual, Sha256Digest::of(b"payload").to_hex());
            }
            other => panic!("expected HashMismatch, got {other:?}"),
        }
    }
}

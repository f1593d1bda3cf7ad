use std::fmt;
use std::str::FromStr;

use crate::hasher::{Hasher, Sha256Hasher};
use crate::{Result, VerifyError};

pub const SHA256_LEN: usize = 32;

/// A computed SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; SHA256_LEN]);

impl Sha256Digest {
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha256Hasher::new();
        hasher.update(data);
        Self::finish(hasher)
    }

    /// Digest of everything fed to `hasher`.
    pub fn finish(hasher: Sha256Hasher) -> Self {
        let mut out = [0u8; SHA256_LEN];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let out: [u8; SHA256_LEN] =
            bytes.try_into().map_err(|_| VerifyError::IllegalLength(bytes.len()))?;
        Ok(Self(out))
    }

    /// Lowercase hexadecimal rendering.
    pub fn to_hex(&self) -> String { hex::encode(self.0) }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A caller-supplied reference digest.
///
/// Parsing accepts upper or lower case and surrounding whitespace; the value
/// is normalized so comparison is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDigest(Sha256Digest);

impl ExpectedDigest {
    pub fn from_hex(s: &str) -> Result<Self> { s.parse() }

    pub fn matches(&self, actual: &Sha256Digest) -> bool { &self.0 == actual }
}

impl FromStr for ExpectedDigest {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != SHA256_LEN * 2 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VerifyError::InvalidDigest(s.to_string()));
        }
        let bytes =
            hex::decode(s.to_ascii_lowercase()).map_err(|_| VerifyError::InvalidDigest(s.to_string()))?;
        Ok(Self(Sha256Digest::from_slice(&bytes)?))
    }
}

impl fmt::Display for ExpectedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

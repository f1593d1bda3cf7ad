#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        expected: String,
        actual:   String,
    },

    #[error("invalid SHA-256 digest {0:?}: expected 64 hexadecimal characters")]
    InvalidDigest(String),

    #[error("illegal digest length: {0} bytes")]
    IllegalLength(usize),
}

pub type Result<T> = std::result::Result<T, VerifyError>;

use std::fmt;

use bytes::{Bytes, BytesMut};

/// An inclusive byte interval, as sent in a `Range: bytes=<start>-<end>` header.
///
/// Construction guarantees `start <= end`, so a range is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    start: u64,
    end:   u64,
}

impl ByteRange {
    /// Create a range covering `start..=end`.
    ///
    /// Returns `None` when `end < start`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> u64 { self.start }

    /// Last byte offset, inclusive.
    pub fn end(&self) -> u64 { self.end }

    /// One past the last byte offset.
    pub fn end_exclusive(&self) -> u64 { self.end + 1 }

    pub fn len(&self) -> u64 { self.end - self.start + 1 }

    /// The value of the `Range` request header.
    ///
    /// ```
    /// use refill_fetch::ByteRange;
    ///
    /// let range = ByteRange::new(5, 7).unwrap();
    /// assert_eq!(range.header_value(), "bytes=5-7");
    /// ```
    pub fn header_value(&self) -> String { format!("bytes={}-{}", self.start, self.end) }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The outcome of one HTTP exchange: the body bytes received and the
/// `Content-Length` the response declared for itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunk {
    pub body:           Bytes,
    pub content_length: Option<u64>,
}

impl Chunk {
    pub fn new(body: impl Into<Bytes>, content_length: Option<u64>) -> Self {
        Self {
            body: body.into(),
            content_length,
        }
    }

    pub fn len(&self) -> u64 { self.body.len() as u64 }

    pub fn is_empty(&self) -> bool { self.body.is_empty() }

    /// Whether fewer bytes arrived than the response itself declared.
    pub fn is_short(&self) -> bool {
        self.content_length.is_some_and(|declared| self.len() < declared)
    }
}

/// Bytes confirmed received so far, in offset order.
///
/// The accumulator only grows: every append lands at the current end and
/// earlier bytes are never revised.
#[derive(Debug, Default)]
pub struct Accumulator {
    buf: BytesMut,
}

impl Accumulator {
    pub fn new(initial: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(initial),
        }
    }

    /// Current offset, which is also the accumulated length.
    pub fn offset(&self) -> u64 { self.buf.len() as u64 }

    /// Append a chunk body and return the number of bytes added.
    pub fn append(&mut self, bytes: &[u8]) -> u64 {
        self.buf.extend_from_slice(bytes);
        bytes.len() as u64
    }

    pub fn into_bytes(self) -> Bytes { self.buf.freeze() }
}

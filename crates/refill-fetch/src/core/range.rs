use std::num::NonZeroU64;

use crate::data::ByteRange;

/// Compute the next range to request.
///
/// The range starts exactly at `offset` and covers at most `chunk_size`
/// bytes, clipped so it never reaches past `declared_length`. Returns `None`
/// once `offset >= declared_length`, which is the loop's terminal condition.
///
/// # Examples
///
/// ```
/// use refill_fetch::next_range;
/// use std::num::NonZeroU64;
///
/// let chunk = NonZeroU64::new(3).unwrap();
///
/// let first = next_range(5, 10, chunk).unwrap();
/// assert_eq!((first.start(), first.end()), (5, 7));
///
/// let last = next_range(8, 10, chunk).unwrap();
/// assert_eq!((last.start(), last.end()), (8, 9));
///
/// assert!(next_range(10, 10, chunk).is_none());
/// ```
pub fn next_range(offset: u64, declared_length: u64, chunk_size: NonZeroU64) -> Option<ByteRange> {
    if offset >= declared_length {
        return None;
    }
    let end_exclusive = offset.saturating_add(chunk_size.get()).min(declared_length);
    ByteRange::new(offset, end_exclusive - 1)
}

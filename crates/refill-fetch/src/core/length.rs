/// Parse a `Content-Length` header value.
///
/// Returns `None` for an absent header or anything that is not a
/// non-negative decimal integer.
///
/// # Examples
///
/// ```
/// use refill_fetch::parse_content_length;
///
/// assert_eq!(parse_content_length(Some("1024")), Some(1024));
/// assert_eq!(parse_content_length(Some(" 42 ")), Some(42));
/// assert_eq!(parse_content_length(Some("-1")), None);
/// assert_eq!(parse_content_length(None), None);
/// ```
pub fn parse_content_length(value: Option<&str>) -> Option<u64> {
    let value = value?.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Collapse an unknown declared length to zero.
///
/// An unknown length is treated as "already complete with zero bytes" so the
/// pipeline never waits for an authoritative length that will not arrive.
pub fn declared_or_zero(declared: Option<u64>) -> u64 { declared.unwrap_or(0) }

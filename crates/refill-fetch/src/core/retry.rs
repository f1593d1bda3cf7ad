use std::time::Duration;

/// Upper bound for the delay between two range requests.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Delay before the next range request.
///
/// `stalled` is the number of consecutive range responses that delivered no
/// bytes. While the backfill makes progress the delay is the fixed `pacing`;
/// after empty responses it doubles per empty response, capped at
/// [`MAX_RETRY_DELAY`]. A zero `pacing` always yields zero.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use refill_fetch::core::retry_delay;
///
/// let pacing = Duration::from_millis(500);
///
/// assert_eq!(retry_delay(0, pacing), Duration::from_millis(500));
/// assert_eq!(retry_delay(1, pacing), Duration::from_millis(1000));
/// assert_eq!(retry_delay(2, pacing), Duration::from_millis(2000));
/// assert_eq!(retry_delay(5, Duration::ZERO), Duration::ZERO);
/// ```
pub fn retry_delay(stalled: u32, pacing: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(stalled);

    pacing.saturating_mul(multiplier).min(MAX_RETRY_DELAY.max(pacing))
}

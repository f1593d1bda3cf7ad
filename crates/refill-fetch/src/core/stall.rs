/// Counts consecutive range responses that delivered no bytes.
///
/// Any response that advances the offset resets the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallGuard {
    max_attempts: u32,
    consecutive:  u32,
}

impl StallGuard {
    /// `max_attempts` below 1 is treated as 1.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            consecutive:  0,
        }
    }

    /// Record how many bytes a response delivered.
    ///
    /// Returns `true` once the limit of consecutive empty responses is reached.
    pub fn observe(&mut self, received: u64) -> bool {
        if received > 0 {
            self.consecutive = 0;
            return false;
        }
        self.consecutive += 1;
        self.consecutive >= self.max_attempts
    }

    /// Consecutive empty responses seen so far.
    pub fn consecutive(&self) -> u32 { self.consecutive }
}

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::core::{StallGuard, next_range, retry_delay};
use crate::data::{Accumulator, ByteRange, Chunk, FetchOptions, FetchPhase, Progress};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result, StallReason};

/// The assembled payload and the ranges that were requested to complete it.
pub(crate) struct Backfilled {
    pub payload: Bytes,
    pub ranges:  Vec<ByteRange>,
}

/// Drives range requests until the accumulator reaches the declared length.
///
/// Invariant between iterations: `accumulator.offset()` is the number of bytes
/// confirmed so far, and the next range always starts exactly there.
pub(crate) struct BackfillEngine<'a, C: HttpClient> {
    client:          &'a C,
    url:             &'a str,
    options:         &'a FetchOptions,
    declared_length: u64,
    accumulator:     Accumulator,
    ranges:          Vec<ByteRange>,
    stall:           StallGuard,
}

impl<'a, C: HttpClient> BackfillEngine<'a, C> {
    pub fn new(
        client: &'a C,
        url: &'a str,
        options: &'a FetchOptions,
        initial: &Chunk,
        declared_length: u64,
    ) -> Self {
        Self {
            client,
            url,
            options,
            declared_length,
            accumulator: Accumulator::new(&initial.body),
            ranges: Vec::new(),
            stall: StallGuard::new(options.max_stalled_attempts),
        }
    }

    pub async fn run(mut self) -> Result<Backfilled> {
        let started = Instant::now();

        while let Some(range) = next_range(
            self.accumulator.offset(),
            self.declared_length,
            self.options.chunk_size,
        ) {
            if !self.ranges.is_empty() {
                let delay = retry_delay(self.stall.consecutive(), self.options.pacing);
                let delay = match self.remaining(started)? {
                    Some(remaining) => delay.min(remaining),
                    None => delay,
                };
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }

            let chunk = self.request(range, started).await?;
            let received = self.accumulator.append(&chunk.body);
            let offset = self.accumulator.offset();
            debug!(
                %range,
                received,
                offset,
                declared_length = self.declared_length,
                "range response"
            );

            if chunk.is_short() {
                debug!(
                    %range,
                    received,
                    content_length = ?chunk.content_length,
                    "range response ended before its declared length, continuing from new offset"
                );
            }
            if offset > self.declared_length {
                warn!(
                    offset,
                    declared_length = self.declared_length,
                    "server delivered bytes past the declared length"
                );
            }

            if self.stall.observe(received) {
                return Err(self.stalled(StallReason::NoProgress {
                    attempts: self.stall.consecutive(),
                }));
            }
            if received == 0 {
                warn!(
                    %range,
                    attempts = self.stall.consecutive(),
                    "range response made no progress"
                );
            }
        }

        Ok(Backfilled {
            payload: self.accumulator.into_bytes(),
            ranges:  self.ranges,
        })
    }

    async fn request(&mut self, range: ByteRange, started: Instant) -> Result<Chunk> {
        let remaining = self.remaining(started)?;

        self.ranges.push(range);
        let attempt = self.ranges.len() as u32;
        self.report(
            Progress::new(
                FetchPhase::Backfilling,
                self.accumulator.offset(),
                Some(self.declared_length),
            )
            .with_range(range, attempt),
        );

        let (client, url) = (self.client, self.url);
        let exchange = client.get(url, Some(range));
        let chunk = match remaining {
            None => exchange.await,
            Some(remaining) => tokio::time::timeout(remaining, exchange)
                .await
                .map_err(|_| self.budget_exhausted())?,
        };

        chunk.map_err(FetchError::transport)
    }

    /// Time left in the budget, `None` when the backfill is unbounded.
    ///
    /// Fails once the budget is used up, so pacing never sleeps past it.
    fn remaining(&self, started: Instant) -> Result<Option<Duration>> {
        let Some(budget) = self.options.time_budget else {
            return Ok(None);
        };
        let remaining = budget.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            return Err(self.budget_exhausted());
        }
        Ok(Some(remaining))
    }

    fn budget_exhausted(&self) -> FetchError {
        let budget = self.options.time_budget.unwrap_or_default();
        self.stalled(StallReason::TimeBudget { budget })
    }

    fn stalled(&self, reason: StallReason) -> FetchError {
        FetchError::StalledBackfill {
            offset: self.accumulator.offset(),
            declared_length: self.declared_length,
            reason,
        }
    }

    fn report(&self, progress: Progress) {
        if let Some(ref callback) = self.options.on_progress {
            callback(&progress);
        }
    }
}

use refill_verify::{ExpectedDigest, verify};
use tracing::{info, warn};

use crate::core::declared_or_zero;
use crate::data::{Chunk, Download, FetchOptions, FetchPhase, Progress, VerifiedDownload};
use crate::effects::backfill::BackfillEngine;
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Downloads one resource, backfilling a truncated response with range
/// requests, and optionally verifies it.
///
/// The URL is fixed at construction; every stage runs sequentially because
/// each range request depends on the offset reached by the previous one.
pub struct Fetcher<C: HttpClient> {
    client:  C,
    url:     String,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a new fetcher for `url` with default options.
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C { &self.client }

    /// Ask the server for the declared total length.
    ///
    /// A missing or unparsable `Content-Length` yields 0 rather than an error.
    pub async fn declared_length(&self) -> Result<u64> {
        let declared = self
            .client
            .content_length(&self.url)
            .await
            .map_err(FetchError::transport)?;

        if declared.is_none() {
            warn!(url = %self.url, "declared length unavailable, treating it as 0");
        }
        let declared = declared_or_zero(declared);
        info!(url = %self.url, declared_length = declared, "declared length probed");

        self.report(Progress::new(FetchPhase::Probing, 0, Some(declared)));
        Ok(declared)
    }

    /// Issue the unconditional initial GET. A short body is not an error.
    ///
    /// The [`FetchPhase::Fetching`] progress event is reported by
    /// [`Fetcher::backfill`], once the initial length can be compared with
    /// the declared one.
    pub async fn fetch_initial(&self) -> Result<Chunk> {
        let chunk = self
            .client
            .get(&self.url, None)
            .await
            .map_err(FetchError::transport)?;

        if chunk.is_short() {
            info!(
                url = %self.url,
                received = chunk.len(),
                content_length = ?chunk.content_length,
                "initial response ended before its declared length"
            );
        } else {
            info!(url = %self.url, received = chunk.len(), "initial fetch finished");
        }
        Ok(chunk)
    }

    /// Complete `initial` up to `declared_length` with range requests.
    ///
    /// Performs no request at all when `initial` already covers the declared
    /// length.
    pub async fn backfill(&self, initial: Chunk, declared_length: u64) -> Result<Download> {
        let initial_length = initial.len();
        self.report(Progress::new(FetchPhase::Fetching, initial_length, Some(declared_length)));

        if initial_length >= declared_length {
            info!(initial_length, declared_length, "initial fetch is complete, nothing to backfill");
            return Ok(Download {
                declared_length,
                initial_length,
                ranges: Vec::new(),
                payload: initial.body,
            });
        }

        info!(
            initial_length,
            declared_length,
            missing = declared_length - initial_length,
            "initial fetch was truncated, backfilling"
        );
        let backfilled =
            BackfillEngine::new(&self.client, &self.url, &self.options, &initial, declared_length)
                .run()
                .await?;
        info!(
            requests = backfilled.ranges.len(),
            length = backfilled.payload.len(),
            "backfill complete"
        );

        Ok(Download {
            declared_length,
            initial_length,
            ranges: backfilled.ranges,
            payload: backfilled.payload,
        })
    }

    /// Length oracle, initial fetch and backfill, in that order.
    pub async fn download(&self) -> Result<Download> {
        let declared_length = self.declared_length().await?;
        let initial = self.fetch_initial().await?;
        self.backfill(initial, declared_length).await
    }

    /// [`Fetcher::download`] followed by SHA-256 verification.
    ///
    /// # Errors
    ///
    /// [`FetchError::HashMismatch`] when `reference` is given and differs from
    /// the digest of the assembled payload, in addition to the download errors.
    pub async fn download_verified(
        &self,
        reference: Option<&ExpectedDigest>,
    ) -> Result<VerifiedDownload> {
        let download = self.download().await?;
        let total = Some(download.declared_length);

        self.report(Progress::new(FetchPhase::Verifying, download.len(), total));
        let verification = verify(&download.payload, reference).into_result()?;
        info!(
            digest = %verification.digest,
            outcome = %verification.outcome,
            "payload verified"
        );

        self.report(Progress::new(FetchPhase::Completed, download.len(), total));
        Ok(VerifiedDownload {
            download,
            verification,
        })
    }

    fn report(&self, progress: Progress) {
        if let Some(ref callback) = self.options.on_progress {
            callback(&progress);
        }
    }
}

use std::future::Future;

use crate::data::{ByteRange, Chunk};

/// Asynchronous HTTP transport abstraction.
///
/// This trait provides the minimal interface the pipeline needs. Each call is
/// one complete request/response exchange; implementations acquire and release
/// their connection within the call, on success and on error alike.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Scripted fakes in tests
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + 'static;

    /// Issue a GET, optionally restricted with a `Range` header.
    ///
    /// Returns whatever body bytes arrived before the response ended, paired
    /// with the response's own `Content-Length`. A body cut short by the server
    /// is not an error: the caller compares lengths and backfills.
    ///
    /// # Errors
    ///
    /// Connection failures, timeouts, malformed responses and HTTP error
    /// statuses.
    fn get(
        &self,
        url: &str,
        range: Option<ByteRange>,
    ) -> impl Future<Output = std::result::Result<Chunk, Self::Error>> + Send;

    /// Query the `Content-Length` header without reading the body.
    ///
    /// `Ok(None)` when the header is absent or unparsable.
    fn content_length(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<Option<u64>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use bytes::BytesMut;
    use futures_util::StreamExt;
    use reqwest::header::{CONTENT_LENGTH, HeaderMap, RANGE};
    use tracing::debug;

    use crate::core::parse_content_length;
    use crate::data::Timeouts;
    use crate::error::{FetchError, Result};

    /// Production HTTP client implementation using reqwest.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default timeouts.
        pub fn new() -> Result<Self> { Self::with_timeouts(Timeouts::default()) }

        pub fn with_timeouts(timeouts: Timeouts) -> Result<Self> {
            let client = reqwest::Client::builder()
                .connect_timeout(timeouts.connect)
                .read_timeout(timeouts.read)
                .build()
                .map_err(FetchError::transport)?;
            Ok(Self { client })
        }

        async fn send(
            &self,
            url: &str,
            range: Option<ByteRange>,
        ) -> std::result::Result<reqwest::Response, reqwest::Error> {
            let mut request = self.client.get(url);
            if let Some(range) = range {
                request = request.header(RANGE, range.header_value());
            }

            let response = request.send().await?;
            debug!(
                url,
                status = %response.status(),
                headers = ?response.headers(),
                "response received"
            );
            response.error_for_status()
        }
    }

    /// Whether `e` means the server closed the connection before the body was
    /// complete.
    ///
    /// hyper reports this as an `UnexpectedEof` I/O error, which reqwest wraps
    /// as a body or decode error depending on where the stream was polled.
    /// Timeouts never count as truncation.
    fn is_truncated_body(e: &reqwest::Error) -> bool {
        if e.is_timeout() || !(e.is_body() || e.is_decode()) {
            return false;
        }
        let mut source = std::error::Error::source(e);
        while let Some(cause) = source {
            if let Some(io) = cause.downcast_ref::<std::io::Error>() {
                return io.kind() == std::io::ErrorKind::UnexpectedEof;
            }
            source = cause.source();
        }
        false
    }

    fn header_content_length(headers: &HeaderMap) -> Option<u64> {
        parse_content_length(headers.get(CONTENT_LENGTH).and_then(|v| v.to_str().ok()))
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
            range: Option<ByteRange>,
        ) -> std::result::Result<Chunk, Self::Error> {
            let response = self.send(url, range).await?;
            let content_length = header_content_length(response.headers());

            let mut body = BytesMut::new();
            let mut stream = response.bytes_stream();
            while let Some(item) = stream.next().await {
                match item {
                    Ok(bytes) => body.extend_from_slice(&bytes),
                    Err(e) if is_truncated_body(&e) => {
                        debug!(url, received = body.len(), error = %e, "response body ended early");
                        break;
                    }
                    Err(e) => return Err(e),
                }
            }

            Ok(Chunk::new(body.freeze(), content_length))
        }

        async fn content_length(&self, url: &str) -> std::result::Result<Option<u64>, Self::Error> {
            let response = self.send(url, None).await?;
            Ok(header_content_length(response.headers()))
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;

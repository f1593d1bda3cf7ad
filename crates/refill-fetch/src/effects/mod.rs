//! I/O operations for backfilled downloads.
//!
//! Every network exchange goes through [`HttpClient`], so the length oracle,
//! the initial fetch and the backfill loop run unchanged against a fake
//! transport in tests.

mod backfill;
mod fetcher;
mod http;

pub use fetcher::Fetcher;
pub use http::HttpClient;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;

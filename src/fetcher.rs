//! The fetch seam and its HTTP implementation.

use std::future::Future;
use std::io::Read;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::parser::parse_time_document;
use crate::reading::TimeReading;

/// Endpoint of the AFIP official time service.
pub const DEFAULT_ENDPOINT: &str = "http://time.afip.gov.ar";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024;

/// Anything that can produce the current official time.
///
/// [`HttpTimeFetcher`] is the real implementation. The caching decorator
/// wraps any fetcher behind this trait instead of overriding one, and test
/// doubles implement it directly.
pub trait TimeFetcher {
    /// One fetch: request, parse, classify. No retry, no caching here.
    fn fetch_time(&self) -> impl Future<Output = Result<TimeReading, FetchError>> + Send;
}

/// Configuration for [`HttpTimeFetcher`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Origin the GET is issued against.
    pub endpoint: String,
    /// Overall timeout for one request.
    pub timeout: Duration,
    /// Upper bound on the response body; a transfer past it is aborted.
    pub max_body_bytes: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Fetches the official time over plain HTTP.
///
/// Issues a single GET, reads the body as text and parses it. Network and
/// status failures are classified into [`FetchError`] before they reach the
/// caller. There is no cancellation for an in-flight request; a caller that
/// stops waiting simply discards the result.
#[derive(Debug, Clone)]
pub struct HttpTimeFetcher {
    config: FetcherConfig,
}

impl HttpTimeFetcher {
    /// Fetcher against the AFIP endpoint with default limits.
    pub fn new() -> Self {
        Self::with_config(FetcherConfig::default())
    }

    pub fn with_config(config: FetcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

impl Default for HttpTimeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeFetcher for HttpTimeFetcher {
    async fn fetch_time(&self) -> Result<TimeReading, FetchError> {
        let config = self.config.clone();
        debug!("GET {}", config.endpoint);

        // ureq is blocking; run it on the blocking pool so concurrent async
        // callers keep making progress while this request is in flight.
        let body = tokio::task::spawn_blocking(move || fetch_body(&config))
            .await
            .map_err(|err| FetchError::Transport(format!("fetch worker failed to join: {err}")))??;

        parse_time_document(&body)
    }
}

fn fetch_body(config: &FetcherConfig) -> Result<String, FetchError> {
    let response = match ureq::get(&config.endpoint).timeout(config.timeout).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => return Err(FetchError::server(status)),
        Err(err) => return Err(FetchError::Transport(err.to_string())),
    };

    // ureq only errors on >= 400; anything else outside 2xx is still a
    // server-side failure for us.
    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(FetchError::server(status));
    }

    read_bounded_body(response, config.max_body_bytes)
}

fn read_bounded_body(response: ureq::Response, limit: u64) -> Result<String, FetchError> {
    let mut body = String::new();
    response
        .into_reader()
        .take(limit.saturating_add(1))
        .read_to_string(&mut body)
        .map_err(|err| FetchError::Transport(format!("failed to read response body: {err}")))?;

    if body.len() as u64 > limit {
        return Err(FetchError::Transport(format!(
            "response body exceeded {limit} byte limit"
        )));
    }

    Ok(body)
}

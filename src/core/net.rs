// src/core/net.rs

// Document fetch over HTTPS. The pipeline only ever sees the `Fetch` trait,
// so tests and benches can swap in scripted fetchers.

use std::time::Duration;

use thiserror::Error;

use crate::config::consts::{CONNECT_TIMEOUT_SECS, USER_AGENT};

/// Failure of one logical fetch. The scheduler absorbs these into its
/// batch-failure counter; anything else is fatal.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport { url: String, #[source] source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("unreadable payload from {url}: {reason}")]
    Payload { url: String, reason: String },

    #[error("fetch worker for {target} panicked")]
    Panicked { target: String },
}

/// `fetchDocument(url) -> rawBody`. Implementations must be shareable
/// across the worker threads of a batch.
pub trait Fetch: Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// Blocking reqwest client. No read timeout: a slow response stalls its
/// batch, only connection setup is bounded.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Connection setup is bounded by `CONNECT_TIMEOUT_SECS`, a deliberate
    /// exception to the no-timeout rule: a host that never accepts fails its
    /// batch instead of stalling it. Once connected, a response may take as
    /// long as it takes.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport { url: s!(url), source };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(transport)
    }
}

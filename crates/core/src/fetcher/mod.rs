//! HTTP transport used by the thumbnail strategies.
//!
//! Strategies talk to Instagram through the `Fetcher` trait so that tests can
//! swap in `testing::MockFetcher` and count upstream calls.

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a `Fetcher` before a response could be read.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connect, TLS, timeout...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Network failure reported by a non-reqwest transport.
    #[error("Network error: {0}")]
    Network(String),

    /// The request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be read as text.
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// An outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header (builder style).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A response with its body already read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport abstraction for upstream lookups.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform a GET request and read the body.
    ///
    /// Non-success statuses are returned as responses, not errors.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

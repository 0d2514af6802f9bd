//! Mock HTTP fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, FetchRequest, FetchResponse, Fetcher};

/// A request seen by the mock, with the time it arrived.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub at: Instant,
}

impl RecordedFetch {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Response(FetchResponse),
    Fail(String),
}

/// Mock implementation of the Fetcher trait.
///
/// Replies are routed by URL prefix; the most recently registered matching
/// prefix wins. Requests matching no prefix fail with a network error, so an
/// unconfigured mock behaves like an unreachable Instagram.
#[derive(Debug, Default)]
pub struct MockFetcher {
    routes: Arc<RwLock<Vec<(String, Reply)>>>,
    requests: Arc<RwLock<Vec<RecordedFetch>>>,
}

impl MockFetcher {
    /// Create a mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Route Configuration
    // =========================================================================

    /// Answer requests starting with `prefix` with `status` and `body`.
    pub async fn respond(&self, prefix: impl Into<String>, status: u16, body: impl Into<String>) {
        self.routes.write().await.push((
            prefix.into(),
            Reply::Response(FetchResponse::new(status, body)),
        ));
    }

    /// Answer requests starting with `prefix` with a 200 JSON body.
    pub async fn respond_json(&self, prefix: impl Into<String>, body: &serde_json::Value) {
        self.respond(prefix, 200, body.to_string()).await;
    }

    /// Fail requests starting with `prefix` with a transport error.
    pub async fn fail(&self, prefix: impl Into<String>, message: impl Into<String>) {
        self.routes
            .write()
            .await
            .push((prefix.into(), Reply::Fail(message.into())));
    }

    // =========================================================================
    // Request Recording
    // =========================================================================

    /// All requests in arrival order.
    pub async fn recorded_requests(&self) -> Vec<RecordedFetch> {
        self.requests.read().await.clone()
    }

    /// Requests whose URL starts with `prefix`.
    pub async fn requests_matching(&self, prefix: &str) -> Vec<RecordedFetch> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.url.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Number of requests performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        self.requests.write().await.push(RecordedFetch {
            url: request.url.clone(),
            headers: request.headers.clone(),
            at: Instant::now(),
        });

        let reply = self
            .routes
            .read()
            .await
            .iter()
            .rev()
            .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(FetchError::Network(message)),
            None => Err(FetchError::Network(format!(
                "no mock route for {}",
                request.url
            ))),
        }
    }
}

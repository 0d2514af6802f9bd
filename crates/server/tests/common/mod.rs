//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock fetcher standing in for Instagram, enabling E2E testing
//! without network access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use reelthumb_core::{testing::MockFetcher, Config};

/// Re-export fixtures for test convenience
pub use reelthumb_core::testing::fixtures;

/// Test fixture for E2E testing with a mock fetcher.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_thumbnail() {
///     let fixture = TestFixture::new().await;
///     fixture.fetcher.respond(fixtures::OEMBED_ENDPOINT, 200, body).await;
///
///     let response = fixture.post("/api/v1/instagram", json!({
///         "reelUrl": fixtures::REEL_URL
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock fetcher - configure Instagram responses and inspect requests
    pub fetcher: Arc<MockFetcher>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body (`Null` for empty or non-JSON bodies)
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with pacing disabled.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(config: Config) -> Self {
        let fetcher = Arc::new(MockFetcher::new());

        let state = Arc::new(reelthumb_server::state::AppState::new(
            config,
            Arc::clone(&fetcher) as Arc<dyn reelthumb_core::Fetcher>,
        ));

        // Create router
        let router = reelthumb_server::api::create_router(state);

        Self { router, fetcher }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_with_content_type(path, &body.to_string(), "application/json")
            .await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.post_with_content_type(path, body, "application/json")
            .await
    }

    /// Send a POST request with custom content type.
    pub async fn post_with_content_type(
        &self,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Default config with pacing turned off so tests stay fast.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.batch.delay_ms = 0;
    config.reels.delay_ms = 0;
    config
}

//! In-flight gauge accounting for requests the client abandons.
//!
//! Kept in its own test binary: the gauge is process-global, and the E2E
//! tests would move it concurrently.

mod common;

use std::time::Duration;

use serde_json::json;

use common::{fixtures, test_config, TestFixture};
use reelthumb_server::metrics::HTTP_REQUESTS_IN_FLIGHT;

#[tokio::test]
async fn test_dropped_batch_request_releases_in_flight_gauge() {
    let mut config = test_config();
    config.batch.max_delay_ms = 10_000;
    let fixture = TestFixture::with_config(config).await;

    let before = HTTP_REQUESTS_IN_FLIGHT.get();

    let mut pending = Box::pin(fixture.post(
        "/api/v1/instagram/batch",
        json!({
            "reelUrls": fixtures::sample_reel_urls(3),
            "delayMs": 2000
        }),
    ));

    // The batch sleeps between items, so it is still running here.
    let timed_out = tokio::time::timeout(Duration::from_millis(100), pending.as_mut()).await;
    assert!(timed_out.is_err());
    assert_eq!(HTTP_REQUESTS_IN_FLIGHT.get(), before + 1);

    drop(pending);
    assert_eq!(HTTP_REQUESTS_IN_FLIGHT.get(), before);

    // A completed request leaves the gauge where it was as well.
    let response = fixture.get("/api/v1/health").await;
    assert!(response.status.is_success());
    assert_eq!(HTTP_REQUESTS_IN_FLIGHT.get(), before);
}

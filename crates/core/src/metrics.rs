//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Thumbnail resolutions (which strategy produced the result)
//! - Strategy failures (transport, status, parse)
//! - Batch sizes

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Outcome label used when the fallback image was returned.
pub const FALLBACK_OUTCOME: &str = "fallback";

// =============================================================================
// Resolver Metrics
// =============================================================================

/// Thumbnail resolutions total by outcome.
pub static THUMBNAIL_RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelthumb_resolutions_total",
            "Total thumbnail resolutions",
        ),
        &["outcome"], // "oembed", "embed_page", "constructed_url", "fallback"
    )
    .unwrap()
});

/// Resolution duration in seconds.
pub static RESOLUTION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelthumb_resolution_duration_seconds",
            "Duration of a single thumbnail resolution",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Strategy failures by strategy and reason.
pub static STRATEGY_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelthumb_strategy_failures_total",
            "Thumbnail strategy attempts that did not produce a URL",
        ),
        &["strategy", "reason"],
    )
    .unwrap()
});

// =============================================================================
// Batch Metrics
// =============================================================================

/// Reel URLs per batch.
pub static BATCH_SIZE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("reelthumb_batch_size", "Number of reel URLs per batch")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
    )
    .unwrap()
});

/// All core metrics, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(THUMBNAIL_RESOLUTIONS.clone()),
        Box::new(RESOLUTION_DURATION.clone()),
        Box::new(STRATEGY_FAILURES.clone()),
        Box::new(BATCH_SIZE.clone()),
    ]
}

//! Thumbnail resolution for Instagram reels.
//!
//! A `ThumbnailResolver` runs an ordered chain of `ThumbnailStrategy`
//! implementations and returns the first URL produced, or the configured
//! fallback image when every strategy fails. It never returns an error.
//!
//! The standard chain is:
//! 1. `OEmbedStrategy` - Instagram's public oEmbed endpoint
//! 2. `EmbedPageStrategy` - `og:image` / `image` meta tags of the embed page
//! 3. `ConstructedUrlStrategy` - unvalidated `/p/{id}/media/?size=l` guess

mod batch;
mod constructed;
mod embed_page;
mod oembed;

pub use batch::BatchResolver;
pub use constructed::ConstructedUrlStrategy;
pub use embed_page::{extract_image_meta, extract_og_image, EmbedPageStrategy};
pub use oembed::{parse_thumbnail_url, OEmbedStrategy};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::ResolverConfig;
use crate::fetcher::{FetchError, Fetcher};
use crate::metrics::{
    FALLBACK_OUTCOME, RESOLUTION_DURATION, STRATEGY_FAILURES, THUMBNAIL_RESOLUTIONS,
};
use crate::reel::ReelReference;

/// Why a strategy did not produce a thumbnail.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The decoded response lacks the expected field.
    #[error("response has no {0}")]
    MissingField(&'static str),

    /// No image meta tag in the page.
    #[error("no image meta tag found")]
    NoMatch,
}

impl StrategyError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            StrategyError::Transport(_) => "transport",
            StrategyError::Status(_) => "status",
            StrategyError::Parse(_) => "parse",
            StrategyError::MissingField(_) => "missing_field",
            StrategyError::NoMatch => "no_match",
        }
    }
}

/// One way of obtaining a thumbnail URL for a reel.
#[async_trait]
pub trait ThumbnailStrategy: Send + Sync {
    /// Strategy name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Try to produce a thumbnail URL.
    async fn attempt(&self, reel: &ReelReference) -> Result<String, StrategyError>;
}

/// Turns one reel URL into a thumbnail URL. Used by [`BatchResolver`] per item.
#[async_trait]
pub trait ReelResolver: Send + Sync {
    /// The image path used when nothing could be resolved.
    fn fallback(&self) -> &str;

    async fn resolve(&self, reel_url: &str) -> String;
}

/// Resolves reel URLs to thumbnail URLs through a fallback chain.
pub struct ThumbnailResolver {
    strategies: Vec<Box<dyn ThumbnailStrategy>>,
    fallback: String,
}

impl ThumbnailResolver {
    /// Build the standard oEmbed -> embed page -> constructed URL chain.
    pub fn new(config: &ResolverConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let strategies: Vec<Box<dyn ThumbnailStrategy>> = vec![
            Box::new(OEmbedStrategy::new(
                Arc::clone(&fetcher),
                &config.oembed_endpoint,
                &config.user_agent,
            )),
            Box::new(
                EmbedPageStrategy::new(fetcher, &config.embed_base_url, &config.user_agent)
                    .with_secondary_image_meta(config.secondary_image_meta),
            ),
            Box::new(ConstructedUrlStrategy::new(&config.media_base_url)),
        ];

        Self::with_strategies(strategies, config.fallback_image.clone())
    }

    /// Build a resolver with a custom chain.
    pub fn with_strategies(
        strategies: Vec<Box<dyn ThumbnailStrategy>>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            strategies,
            fallback: fallback.into(),
        }
    }

    /// The image path returned when nothing could be resolved.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Strategy names in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve a reel URL to a thumbnail URL.
    ///
    /// Always returns a non-empty string: a resolved URL or the fallback.
    /// Malformed references return the fallback without any network call.
    pub async fn resolve(&self, reel_url: &str) -> String {
        let start = Instant::now();

        let Some(reel) = ReelReference::parse(reel_url) else {
            warn!("Invalid Instagram reel URL: {}", reel_url);
            self.record(FALLBACK_OUTCOME, start);
            return self.fallback.clone();
        };

        let (outcome, thumbnail) = match AssertUnwindSafe(self.run_chain(&reel))
            .catch_unwind()
            .await
        {
            Ok(Some((strategy, url))) => (strategy, url),
            Ok(None) => {
                warn!("No thumbnail strategy succeeded for {}", reel.url());
                (FALLBACK_OUTCOME, self.fallback.clone())
            }
            Err(_) => {
                error!("Thumbnail resolution panicked for {}", reel.url());
                (FALLBACK_OUTCOME, self.fallback.clone())
            }
        };

        self.record(outcome, start);
        thumbnail
    }

    async fn run_chain(&self, reel: &ReelReference) -> Option<(&'static str, String)> {
        for strategy in &self.strategies {
            let name = strategy.name();
            match strategy.attempt(reel).await {
                Ok(url) if !url.trim().is_empty() => {
                    debug!("{} resolved thumbnail for {}: {}", name, reel.id(), url);
                    return Some((name, url));
                }
                Ok(_) => {
                    warn!("{} returned an empty thumbnail for {}", name, reel.id());
                    STRATEGY_FAILURES.with_label_values(&[name, "empty"]).inc();
                }
                Err(e) => {
                    warn!("{} failed for {}: {}", name, reel.id(), e);
                    STRATEGY_FAILURES
                        .with_label_values(&[name, e.reason()])
                        .inc();
                }
            }
        }
        None
    }

    fn record(&self, outcome: &str, start: Instant) {
        THUMBNAIL_RESOLUTIONS.with_label_values(&[outcome]).inc();
        RESOLUTION_DURATION
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl ReelResolver for ThumbnailResolver {
    fn fallback(&self) -> &str {
        ThumbnailResolver::fallback(self)
    }

    async fn resolve(&self, reel_url: &str) -> String {
        ThumbnailResolver::resolve(self, reel_url).await
    }
}

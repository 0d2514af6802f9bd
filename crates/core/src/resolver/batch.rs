//! Sequential batch resolution with pacing.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, error, info};

use super::ReelResolver;
use crate::metrics::BATCH_SIZE;
use crate::reel::ThumbnailResult;

/// Resolves a list of reel URLs one at a time, sleeping between items.
///
/// Items never overlap and there is no sleep after the last one. A failure
/// on one item only affects that item's thumbnail.
pub struct BatchResolver {
    resolver: Arc<dyn ReelResolver>,
    delay: Duration,
}

impl BatchResolver {
    /// `delay` is the pause used by [`BatchResolver::resolve_all`].
    pub fn new(resolver: Arc<dyn ReelResolver>, delay: Duration) -> Self {
        Self { resolver, delay }
    }

    /// Resolve every URL with the default delay.
    pub async fn resolve_all<S>(&self, urls: &[S]) -> Vec<ThumbnailResult>
    where
        S: AsRef<str> + Sync,
    {
        self.resolve_all_with_delay(urls, self.delay).await
    }

    /// Resolve every URL, pausing `delay` between consecutive items.
    ///
    /// Results are in input order, one per input (duplicates included).
    pub async fn resolve_all_with_delay<S>(
        &self,
        urls: &[S],
        delay: Duration,
    ) -> Vec<ThumbnailResult>
    where
        S: AsRef<str> + Sync,
    {
        BATCH_SIZE.observe(urls.len() as f64);
        info!(
            "Resolving batch of {} reels with {}ms delay",
            urls.len(),
            delay.as_millis()
        );

        let mut results = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let url = url.as_ref();
            let thumbnail = match AssertUnwindSafe(self.resolver.resolve(url))
                .catch_unwind()
                .await
            {
                Ok(thumbnail) => thumbnail,
                Err(_) => {
                    error!("Batch item {} panicked: {}", index, url);
                    self.resolver.fallback().to_string()
                }
            };

            debug!("Batch item {}: {} -> {}", index, url, thumbnail);
            results.push(ThumbnailResult::new(url, thumbnail));
        }

        results
    }
}

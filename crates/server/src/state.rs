use std::sync::Arc;
use std::time::Duration;

use reelthumb_core::{BatchResolver, Config, Fetcher, SanitizedConfig, ThumbnailResolver};

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: Arc<ThumbnailResolver>,
    batch: BatchResolver,
}

impl AppState {
    /// Wire the resolver chain and batch resolver on top of `fetcher`.
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        let resolver = Arc::new(ThumbnailResolver::new(&config.resolver, fetcher));
        let batch = BatchResolver::new(
            resolver.clone(),
            Duration::from_millis(config.batch.delay_ms),
        );

        Self {
            config,
            resolver,
            batch,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn resolver(&self) -> &ThumbnailResolver {
        &self.resolver
    }

    pub fn batch(&self) -> &BatchResolver {
        &self.batch
    }
}

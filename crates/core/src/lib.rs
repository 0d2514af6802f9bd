pub mod config;
pub mod fetcher;
pub mod metrics;
pub mod reel;
pub mod resolver;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, BatchConfig, Config, ConfigError,
    ReelsConfig, ResolverConfig, SanitizedConfig, ServerConfig,
};
pub use fetcher::{FetchError, FetchRequest, FetchResponse, Fetcher, HttpFetcher};
pub use reel::{
    extract_reel_id, substitute_fallback, ReelReference, ThumbnailResult, FALLBACK_SENTINEL,
};
pub use resolver::{
    BatchResolver, ConstructedUrlStrategy, EmbedPageStrategy, OEmbedStrategy, ReelResolver,
    StrategyError, ThumbnailResolver, ThumbnailStrategy,
};

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::reel::FALLBACK_SENTINEL;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub reels: ReelsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Thumbnail resolver configuration.
///
/// The upstream URLs are overridable so tests and staging setups can point
/// the strategies at a local stand-in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Path returned when no thumbnail could be resolved.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
    /// Browser-like User-Agent sent to Instagram.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// oEmbed endpoint; the reel URL is appended as the `url` query parameter.
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
    /// Host serving `/reel/{id}/embed/` pages.
    #[serde(default = "default_embed_base_url")]
    pub embed_base_url: String,
    /// Host used for the constructed `/p/{id}/media/?size=l` URL.
    #[serde(default = "default_media_base_url")]
    pub media_base_url: String,
    /// Also look for `<meta name="image">` when `og:image` is absent.
    #[serde(default = "default_true")]
    pub secondary_image_meta: bool,
    /// Request timeout in seconds (transport default when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u32>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_image: default_fallback_image(),
            user_agent: default_user_agent(),
            oembed_endpoint: default_oembed_endpoint(),
            embed_base_url: default_embed_base_url(),
            media_base_url: default_media_base_url(),
            secondary_image_meta: true,
            timeout_secs: None,
        }
    }
}

fn default_fallback_image() -> String {
    FALLBACK_SENTINEL.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_oembed_endpoint() -> String {
    "https://api.instagram.com/oembed/".to_string()
}

fn default_embed_base_url() -> String {
    "https://www.instagram.com".to_string()
}

fn default_media_base_url() -> String {
    "https://instagram.com".to_string()
}

fn default_true() -> bool {
    true
}

/// Batch resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Pause between consecutive lookups in milliseconds (default: 500).
    #[serde(default = "default_batch_delay")]
    pub delay_ms: u64,
    /// Maximum number of URLs accepted by one batch request.
    #[serde(default = "default_max_urls")]
    pub max_urls: usize,
    /// Upper bound for a caller-supplied delay.
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_batch_delay(),
            max_urls: default_max_urls(),
            max_delay_ms: default_max_delay(),
        }
    }
}

fn default_batch_delay() -> u64 {
    500
}

fn default_max_urls() -> usize {
    50
}

fn default_max_delay() -> u64 {
    5000
}

/// Reels grid page configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReelsConfig {
    #[serde(default = "default_reels_title")]
    pub title: String,
    /// Reel URLs rendered on the page, in display order.
    #[serde(default)]
    pub urls: Vec<String>,
    /// Image shown in place of unresolved thumbnails.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
    /// Pause between lookups while building the page (default: 600).
    #[serde(default = "default_reels_delay")]
    pub delay_ms: u64,
    /// Fixed column count; responsive auto-fit when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
}

impl Default for ReelsConfig {
    fn default() -> Self {
        Self {
            title: default_reels_title(),
            urls: Vec::new(),
            fallback_image: default_fallback_image(),
            delay_ms: default_reels_delay(),
            columns: None,
        }
    }
}

fn default_reels_title() -> String {
    "Instagram Reels".to_string()
}

fn default_reels_delay() -> u64 {
    600
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub resolver: ResolverConfig,
    pub batch: BatchConfig,
    pub reels: SanitizedReelsConfig,
}

/// Reels config with the URL list reduced to a count.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedReelsConfig {
    pub title: String,
    pub reel_count: usize,
    pub fallback_image: String,
    pub delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            resolver: config.resolver.clone(),
            batch: config.batch.clone(),
            reels: SanitizedReelsConfig {
                title: config.reels.title.clone(),
                reel_count: config.reels.urls.len(),
                fallback_image: config.reels.fallback_image.clone(),
                delay_ms: config.reels.delay_ms,
                columns: config.reels.columns,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.resolver.fallback_image, "/fallback.jpg");
        assert_eq!(
            config.resolver.oembed_endpoint,
            "https://api.instagram.com/oembed/"
        );
        assert!(config.resolver.secondary_image_meta);
        assert!(config.resolver.timeout_secs.is_none());
        assert_eq!(config.batch.delay_ms, 500);
        assert_eq!(config.reels.delay_ms, 600);
        assert!(config.reels.urls.is_empty());
    }

    #[test]
    fn test_deserialize_server_section() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_deserialize_resolver_overrides() {
        let toml = r#"
[resolver]
fallback_image = "/img/placeholder.png"
embed_base_url = "http://localhost:9999"
secondary_image_meta = false
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.resolver.fallback_image, "/img/placeholder.png");
        assert_eq!(config.resolver.embed_base_url, "http://localhost:9999");
        assert!(!config.resolver.secondary_image_meta);
        assert_eq!(config.resolver.timeout_secs, Some(5));
        // untouched fields keep defaults
        assert_eq!(config.resolver.media_base_url, "https://instagram.com");
    }

    #[test]
    fn test_deserialize_reels_section() {
        let toml = r#"
[reels]
urls = [
    "https://www.instagram.com/reel/DI1FodctCVQ/",
    "https://www.instagram.com/reel/DJ4KP0WSV63/",
]
columns = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.reels.urls.len(), 2);
        assert_eq!(config.reels.columns, Some(3));
        assert_eq!(config.reels.title, "Instagram Reels");
    }

    #[test]
    fn test_sanitized_config_counts_reels() {
        let mut config = Config::default();
        config.reels.urls = vec![
            "https://www.instagram.com/reel/A/".to_string(),
            "https://www.instagram.com/reel/B/".to_string(),
        ];

        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.reels.reel_count, 2);
        assert_eq!(sanitized.server.port, 8080);
        assert_eq!(sanitized.batch.max_urls, 50);

        let json = serde_json::to_value(&sanitized).unwrap();
        assert!(json["reels"].get("urls").is_none());
        assert_eq!(json["reels"]["reel_count"], 2);
    }
}

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Fallback images and user agent are not empty
/// - Upstream base URLs are http(s)
/// - Batch limits are consistent
/// - Reels column count is sensible
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Resolver validation
    let resolver = &config.resolver;
    if resolver.fallback_image.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "resolver.fallback_image cannot be empty".to_string(),
        ));
    }
    if resolver.user_agent.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "resolver.user_agent cannot be empty".to_string(),
        ));
    }
    for (key, value) in [
        ("resolver.oembed_endpoint", &resolver.oembed_endpoint),
        ("resolver.embed_base_url", &resolver.embed_base_url),
        ("resolver.media_base_url", &resolver.media_base_url),
    ] {
        if !is_http_url(value) {
            return Err(ConfigError::ValidationError(format!(
                "{} must start with http:// or https:// (got '{}')",
                key, value
            )));
        }
    }

    // Batch validation
    let batch = &config.batch;
    if batch.max_urls == 0 {
        return Err(ConfigError::ValidationError(
            "batch.max_urls must be at least 1".to_string(),
        ));
    }
    if batch.delay_ms > batch.max_delay_ms {
        return Err(ConfigError::ValidationError(format!(
            "batch.delay_ms ({}) exceeds batch.max_delay_ms ({})",
            batch.delay_ms, batch.max_delay_ms
        )));
    }

    // Reels page validation
    let reels = &config.reels;
    if reels.fallback_image.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "reels.fallback_image cannot be empty".to_string(),
        ));
    }
    if reels.delay_ms > batch.max_delay_ms {
        return Err(ConfigError::ValidationError(format!(
            "reels.delay_ms ({}) exceeds batch.max_delay_ms ({})",
            reels.delay_ms, batch.max_delay_ms
        )));
    }
    if let Some(columns) = reels.columns {
        if !(1..=12).contains(&columns) {
            return Err(ConfigError::ValidationError(format!(
                "reels.columns must be between 1 and 12 (got {})",
                columns
            )));
        }
    }

    Ok(())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use std::net::IpAddr;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse::<IpAddr>().unwrap(),
                port: 0,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_fallback_fails() {
        let mut config = Config::default();
        config.resolver.fallback_image = "  ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_non_http_base_url_fails() {
        let mut config = Config::default();
        config.resolver.embed_base_url = "ftp://instagram.com".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("resolver.embed_base_url"));
    }

    #[test]
    fn test_validate_delay_above_cap_fails() {
        let mut config = Config::default();
        config.batch.delay_ms = 10_000;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.reels.delay_ms = 10_000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_columns_range() {
        let mut config = Config::default();
        config.reels.columns = Some(0);
        assert!(validate_config(&config).is_err());

        config.reels.columns = Some(13);
        assert!(validate_config(&config).is_err());

        config.reels.columns = Some(3);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_max_urls_fails() {
        let mut config = Config::default();
        config.batch.max_urls = 0;
        assert!(validate_config(&config).is_err());
    }
}

//! reqwest-backed `Fetcher`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::{FetchError, FetchRequest, FetchResponse, Fetcher};
use crate::config::ResolverConfig;

/// Fetcher that performs real HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher; `None` keeps reqwest's default (no) timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Create a fetcher from the resolver configuration.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, FetchError> {
        Self::new(
            config
                .timeout_secs
                .map(|secs| Duration::from_secs(secs as u64)),
        )
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = Url::parse(&request.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", request.url, e)))?;

        let mut builder = self.client.get(url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        debug!(
            "GET {} -> status={} body_len={}",
            request.url,
            status,
            body.len()
        );

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_without_timeout() {
        let config = ResolverConfig::default();
        assert!(HttpFetcher::from_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_url_is_rejected_before_sending() {
        let fetcher = HttpFetcher::new(Some(Duration::from_secs(1))).unwrap();
        let result = tokio_test::block_on(fetcher.fetch(&FetchRequest::get("not a url")));
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}

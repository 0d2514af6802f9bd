//! oEmbed strategy.
//!
//! Instagram's public oEmbed endpoint answers with a JSON document whose
//! `thumbnail_url` field points at the reel's cover image.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{StrategyError, ThumbnailStrategy};
use crate::fetcher::{FetchRequest, Fetcher};
use crate::reel::ReelReference;

/// Queries the oEmbed endpoint for `thumbnail_url`.
pub struct OEmbedStrategy {
    fetcher: Arc<dyn Fetcher>,
    endpoint: String,
    user_agent: String,
}

impl OEmbedStrategy {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        endpoint: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Endpoint URL with the reel URL encoded as the `url` parameter.
    pub fn request_url(&self, reel: &ReelReference) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}url={}",
            self.endpoint,
            separator,
            urlencoding::encode(reel.url())
        )
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    thumbnail_url: Option<String>,
}

/// Extract a non-empty `thumbnail_url` from an oEmbed JSON body.
pub fn parse_thumbnail_url(body: &str) -> Result<String, StrategyError> {
    let response: OEmbedResponse =
        serde_json::from_str(body).map_err(|e| StrategyError::Parse(e.to_string()))?;

    response
        .thumbnail_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(StrategyError::MissingField("thumbnail_url"))
}

#[async_trait]
impl ThumbnailStrategy for OEmbedStrategy {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn attempt(&self, reel: &ReelReference) -> Result<String, StrategyError> {
        let request = FetchRequest::get(self.request_url(reel))
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "application/json");

        debug!("oEmbed lookup for {}", reel.id());
        let response = self.fetcher.fetch(&request).await?;
        if !response.is_success() {
            return Err(StrategyError::Status(response.status));
        }

        parse_thumbnail_url(&response.body)
    }
}

//! Embed page strategy.
//!
//! Scrapes `https://www.instagram.com/reel/{id}/embed/` for an image meta tag.
//! This depends on Instagram's markup and may stop matching at any time; a
//! miss is reported like any other strategy failure.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::{StrategyError, ThumbnailStrategy};
use crate::fetcher::{FetchRequest, Fetcher};
use crate::reel::ReelReference;

static OG_IMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+property="og:image"\s+content="([^"]+)""#)
        .expect("valid og:image pattern")
});

static IMAGE_META_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+name="image"\s+content="([^"]+)""#)
        .expect("valid image meta pattern")
});

/// Content of the first `<meta property="og:image" content="...">` tag.
pub fn extract_og_image(html: &str) -> Option<String> {
    capture_content(&OG_IMAGE_PATTERN, html)
}

/// Content of the first `<meta name="image" content="...">` tag.
pub fn extract_image_meta(html: &str) -> Option<String> {
    capture_content(&IMAGE_META_PATTERN, html)
}

fn capture_content(pattern: &Regex, html: &str) -> Option<String> {
    let raw = pattern.captures(html)?.get(1)?.as_str();
    Some(unescape_html_entities(raw))
}

/// Unescapes common HTML entities back to their raw characters.
fn unescape_html_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Fetches the reel's embed page and reads its image meta tags.
pub struct EmbedPageStrategy {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    user_agent: String,
    secondary_image_meta: bool,
}

impl EmbedPageStrategy {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            secondary_image_meta: true,
        }
    }

    /// Enable or disable the `<meta name="image">` fallback pattern.
    pub fn with_secondary_image_meta(mut self, enabled: bool) -> Self {
        self.secondary_image_meta = enabled;
        self
    }

    pub fn embed_url(&self, reel: &ReelReference) -> String {
        format!(
            "{}/reel/{}/embed/",
            self.base_url.trim_end_matches('/'),
            reel.id()
        )
    }

    fn extract(&self, html: &str) -> Option<String> {
        extract_og_image(html).or_else(|| {
            if self.secondary_image_meta {
                extract_image_meta(html)
            } else {
                None
            }
        })
    }
}

#[async_trait]
impl ThumbnailStrategy for EmbedPageStrategy {
    fn name(&self) -> &'static str {
        "embed_page"
    }

    async fn attempt(&self, reel: &ReelReference) -> Result<String, StrategyError> {
        let request =
            FetchRequest::get(self.embed_url(reel)).header("User-Agent", self.user_agent.as_str());

        let response = self.fetcher.fetch(&request).await?;
        debug!(
            "embed page status={} html_len={} for {}",
            response.status,
            response.body.len(),
            reel.id()
        );
        if !response.is_success() {
            return Err(StrategyError::Status(response.status));
        }

        self.extract(&response.body).ok_or(StrategyError::NoMatch)
    }
}

use async_trait::async_trait;

use super::{StrategyError, ThumbnailStrategy};
use crate::reel::ReelReference;

/// Builds the legacy `/p/{id}/media/?size=l` URL from the reel id.
///
/// Makes no network call and always succeeds. The URL is not checked and may
/// not serve an image.
pub struct ConstructedUrlStrategy {
    base_url: String,
}

impl ConstructedUrlStrategy {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn media_url(&self, reel: &ReelReference) -> String {
        format!(
            "{}/p/{}/media/?size=l",
            self.base_url.trim_end_matches('/'),
            reel.id()
        )
    }
}

#[async_trait]
impl ThumbnailStrategy for ConstructedUrlStrategy {
    fn name(&self) -> &'static str {
        "constructed_url"
    }

    async fn attempt(&self, reel: &ReelReference) -> Result<String, StrategyError> {
        Ok(self.media_url(reel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_constructs_media_url() {
        let strategy = ConstructedUrlStrategy::new("https://instagram.com");
        let reel = ReelReference::parse("https://www.instagram.com/reel/DI1FodctCVQ/").unwrap();
        assert_eq!(
            strategy.attempt(&reel).await.unwrap(),
            "https://instagram.com/p/DI1FodctCVQ/media/?size=l"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let strategy = ConstructedUrlStrategy::new("https://instagram.com/");
        let reel = ReelReference::parse("/reel/a-b_c").unwrap();
        assert_eq!(
            strategy.media_url(&reel),
            "https://instagram.com/p/a-b_c/media/?size=l"
        );
    }
}

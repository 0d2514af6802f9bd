//! Reel references and thumbnail results.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Image path returned when no thumbnail could be resolved.
pub const FALLBACK_SENTINEL: &str = "/fallback.jpg";

static REEL_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/reel/([A-Za-z0-9_-]+)").expect("valid reel id pattern"));

/// Extracts the reel identifier from anything containing a `/reel/<id>` segment.
///
/// The first occurrence wins. `/reels/<id>` and `/p/<id>` are not reel
/// references.
pub fn extract_reel_id(url: &str) -> Option<&str> {
    REEL_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A reel URL together with its extracted identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelReference {
    url: String,
    id: String,
}

impl ReelReference {
    /// Parse a reel URL. Returns `None` when it has no `/reel/<id>` segment.
    pub fn parse(url: &str) -> Option<Self> {
        let id = extract_reel_id(url)?;
        Some(Self {
            url: url.to_string(),
            id: id.to_string(),
        })
    }

    /// The URL exactly as supplied by the caller.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The reel identifier (shortcode).
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A reel URL paired with the thumbnail resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailResult {
    pub url: String,
    pub thumbnail: String,
}

impl ThumbnailResult {
    pub fn new(url: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            thumbnail: thumbnail.into(),
        }
    }

    /// True when the thumbnail is the resolver's fallback sentinel.
    pub fn is_fallback(&self, sentinel: &str) -> bool {
        self.thumbnail == sentinel
    }

    /// Replace the sentinel with the caller's own fallback asset.
    pub fn with_fallback(mut self, sentinel: &str, replacement: &str) -> Self {
        if self.is_fallback(sentinel) {
            self.thumbnail = replacement.to_string();
        }
        self
    }
}

/// Apply [`ThumbnailResult::with_fallback`] to a whole batch, keeping order.
pub fn substitute_fallback(
    results: Vec<ThumbnailResult>,
    sentinel: &str,
    replacement: &str,
) -> Vec<ThumbnailResult> {
    results
        .into_iter()
        .map(|r| r.with_fallback(sentinel, replacement))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_reel_url() {
        assert_eq!(
            extract_reel_id("https://www.instagram.com/reel/DI1FodctCVQ/"),
            Some("DI1FodctCVQ")
        );
    }

    #[test]
    fn extracts_id_with_dash_and_underscore() {
        assert_eq!(
            extract_reel_id("https://www.instagram.com/reel/DLar02_teFo/?igsh=abc"),
            Some("DLar02_teFo")
        );
        assert_eq!(extract_reel_id("/reel/a-b_c"), Some("a-b_c"));
    }

    #[test]
    fn extracts_without_trailing_slash() {
        assert_eq!(
            extract_reel_id("https://instagram.com/reel/XYZ"),
            Some("XYZ")
        );
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(extract_reel_id("/reel/FIRST/reel/SECOND"), Some("FIRST"));
    }

    #[test]
    fn rejects_non_reel_urls() {
        assert_eq!(extract_reel_id("not-a-url"), None);
        assert_eq!(extract_reel_id("https://www.instagram.com/p/ABC123/"), None);
        assert_eq!(extract_reel_id("https://www.instagram.com/reels/ABC123/"), None);
        assert_eq!(extract_reel_id("https://www.instagram.com/reel/"), None);
        assert_eq!(extract_reel_id(""), None);
    }

    #[test]
    fn id_stops_at_disallowed_character() {
        assert_eq!(extract_reel_id("/reel/abc.def"), Some("abc"));
    }

    #[test]
    fn parse_keeps_original_url() {
        let reel = ReelReference::parse("https://www.instagram.com/reel/DJ4KP0WSV63/").unwrap();
        assert_eq!(reel.url(), "https://www.instagram.com/reel/DJ4KP0WSV63/");
        assert_eq!(reel.id(), "DJ4KP0WSV63");
        assert!(ReelReference::parse("https://example.com/").is_none());
    }

    #[test]
    fn with_fallback_only_replaces_sentinel() {
        let fallback = ThumbnailResult::new("a", FALLBACK_SENTINEL);
        assert!(fallback.is_fallback(FALLBACK_SENTINEL));
        assert_eq!(
            fallback.with_fallback(FALLBACK_SENTINEL, "/img/none.png").thumbnail,
            "/img/none.png"
        );

        let real = ThumbnailResult::new("b", "https://cdn.example.com/b.jpg");
        assert_eq!(
            real.with_fallback(FALLBACK_SENTINEL, "/img/none.png").thumbnail,
            "https://cdn.example.com/b.jpg"
        );
    }

    #[test]
    fn substitute_fallback_preserves_order() {
        let results = vec![
            ThumbnailResult::new("a", FALLBACK_SENTINEL),
            ThumbnailResult::new("b", "https://cdn.example.com/b.jpg"),
            ThumbnailResult::new("c", FALLBACK_SENTINEL),
        ];
        let replaced = substitute_fallback(results, FALLBACK_SENTINEL, "/x.jpg");
        let thumbs: Vec<_> = replaced.iter().map(|r| r.thumbnail.as_str()).collect();
        assert_eq!(thumbs, vec!["/x.jpg", "https://cdn.example.com/b.jpg", "/x.jpg"]);
        let urls: Vec<_> = replaced.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
    }

    #[test]
    fn thumbnail_result_serializes_as_url_thumbnail_pair() {
        let json = serde_json::to_value(ThumbnailResult::new("u", "t")).unwrap();
        assert_eq!(json, serde_json::json!({"url": "u", "thumbnail": "t"}));
    }
}

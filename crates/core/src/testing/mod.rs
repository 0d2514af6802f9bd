//! Testing utilities and mock implementations.
//!
//! `MockFetcher` stands in for Instagram so the whole strategy chain can run
//! without network access; `MockStrategy` drives the resolver directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelthumb_core::testing::{fixtures, MockFetcher};
//!
//! let fetcher = Arc::new(MockFetcher::new());
//! fetcher
//!     .respond(fixtures::OEMBED_ENDPOINT, 200, fixtures::oembed_body("https://cdn/x.jpg"))
//!     .await;
//!
//! let resolver = ThumbnailResolver::new(&ResolverConfig::default(), fetcher.clone());
//! assert_eq!(resolver.resolve(fixtures::REEL_URL).await, "https://cdn/x.jpg");
//! assert_eq!(fetcher.request_count().await, 1);
//! ```

mod mock_fetcher;
mod mock_strategy;

pub use mock_fetcher::{MockFetcher, RecordedFetch};
pub use mock_strategy::MockStrategy;

/// Test fixtures and helper functions.
pub mod fixtures {
    /// A real-looking reel URL.
    pub const REEL_URL: &str = "https://www.instagram.com/reel/DI1FodctCVQ/";

    /// The identifier contained in [`REEL_URL`].
    pub const REEL_ID: &str = "DI1FodctCVQ";

    /// Default oEmbed endpoint; also the request prefix for oEmbed lookups.
    pub const OEMBED_ENDPOINT: &str = "https://api.instagram.com/oembed/";

    /// Default embed page host.
    pub const EMBED_BASE_URL: &str = "https://www.instagram.com";

    /// Request prefix shared by every embed page lookup.
    pub const EMBED_PREFIX: &str = "https://www.instagram.com/reel/";

    /// Default host for constructed media URLs.
    pub const MEDIA_BASE_URL: &str = "https://instagram.com";

    /// The URL the constructed strategy produces for `id`.
    pub fn constructed_url(id: &str) -> String {
        format!("{}/p/{}/media/?size=l", MEDIA_BASE_URL, id)
    }

    /// An oEmbed JSON body carrying `thumbnail_url`.
    pub fn oembed_body(thumbnail_url: &str) -> String {
        serde_json::json!({
            "version": "1.0",
            "type": "rich",
            "provider_name": "Instagram",
            "author_name": "someone",
            "thumbnail_url": thumbnail_url,
            "thumbnail_width": 640,
            "thumbnail_height": 1136,
        })
        .to_string()
    }

    /// An embed page with an `og:image` meta tag.
    pub fn embed_page_html(og_image: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head>\
             <meta property=\"og:type\" content=\"video\">\
             <meta property=\"og:image\" content=\"{}\">\
             </head><body><div class=\"EmbeddedMedia\"></div></body></html>",
            og_image
        )
    }

    /// An embed page with only a `<meta name="image">` tag.
    pub fn embed_page_html_with_image_meta(image: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head>\
             <meta name=\"image\" content=\"{}\">\
             </head><body></body></html>",
            image
        )
    }

    /// A handful of distinct reel URLs.
    pub fn sample_reel_urls(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("https://www.instagram.com/reel/SAMPLE{:03}/", i))
            .collect()
    }
}

//! Server-rendered HTML pages.

mod reels_html;

pub use reels_html::render_reels_page;

/// Escapes a string for safe embedding in HTML text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">it's & more</a>"#),
            "&lt;a href=&quot;x&quot;&gt;it&#x27;s &amp; more&lt;/a&gt;"
        );
    }

    #[test]
    fn leaves_urls_readable() {
        assert_eq!(
            escape_html("https://instagram.com/p/ABC/media/?size=l"),
            "https://instagram.com/p/ABC/media/?size=l"
        );
    }
}

use reelthumb_core::ThumbnailResult;

use super::escape_html;

const STYLE: &str = r#"
body { margin: 0; padding: 24px; font-family: system-ui, sans-serif; background: #111; color: #eee; }
h1 { font-size: 1.5rem; margin: 0 0 20px; }
.instagram-reels-grid { display: grid; grid-template-columns: repeat(var(--columns, auto-fit), minmax(280px, 1fr)); gap: 20px; width: 100%; }
@media (max-width: 768px) { .instagram-reels-grid { grid-template-columns: repeat(2, 1fr); gap: 15px; } }
@media (max-width: 480px) { .instagram-reels-grid { grid-template-columns: 1fr; gap: 12px; } }
.instagram-reel-item { position: relative; display: block; aspect-ratio: 9 / 16; border-radius: 12px; overflow: hidden; background: #000; border: 1px solid rgba(255, 255, 255, 0.1); transition: transform 0.3s ease, box-shadow 0.3s ease; }
.instagram-reel-item:hover { transform: scale(1.05); box-shadow: 0 10px 30px rgba(0, 0, 0, 0.3); }
.instagram-reel-item:focus { outline: 2px solid #3897f0; outline-offset: 2px; }
.instagram-reel-item img { width: 100%; height: 100%; object-fit: cover; }
.instagram-reel-overlay { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(0, 0, 0, 0.2); }
.instagram-reels-error { padding: 40px; text-align: center; color: #999; }
"#;

/// Renders the reels grid page.
///
/// Each result becomes a link to the reel (opened in a new tab) wrapping its
/// thumbnail. `fallback_image` is also wired as the `onerror` replacement for
/// thumbnails that fail to load in the browser.
pub fn render_reels_page(
    title: &str,
    results: &[ThumbnailResult],
    columns: Option<u32>,
    fallback_image: &str,
) -> String {
    let title = escape_html(title);
    let body = if results.is_empty() {
        "<div class=\"instagram-reels-error\"><p>No reels to display</p></div>".to_string()
    } else {
        render_grid(results, columns, fallback_image)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>"#
    )
}

fn render_grid(
    results: &[ThumbnailResult],
    columns: Option<u32>,
    fallback_image: &str,
) -> String {
    let style = columns
        .map(|c| format!(" style=\"--columns: {}\"", c))
        .unwrap_or_default();
    // Handed to the error handler as data so the path never becomes script text.
    let fallback = escape_html(fallback_image);

    let items: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let n = index + 1;
            format!(
                r#"<a class="instagram-reel-item" href="{href}" target="_blank" rel="noopener noreferrer" aria-label="Open Instagram reel {n}">
<img src="{src}" alt="Instagram Reel {n}" loading="lazy" data-fallback="{fallback}" onerror="this.onerror=null;this.src=this.dataset.fallback">
<div class="instagram-reel-overlay"><svg width="48" height="48" viewBox="0 0 24 24" fill="white"><path d="M8 5v14l11-7z"/></svg></div>
</a>"#,
                href = escape_html(&result.url),
                src = escape_html(&result.thumbnail),
            )
        })
        .collect();

    format!(
        concat!(
            "<div class=\"instagram-reels-container\">",
            "<div class=\"instagram-reels-grid\"{}>\n{}\n</div></div>"
        ),
        style,
        items.join("\n")
    )
}

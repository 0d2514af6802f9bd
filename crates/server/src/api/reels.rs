//! Reels grid page.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::Html};
use tracing::info;

use reelthumb_core::substitute_fallback;

use crate::state::AppState;
use crate::templates::render_reels_page;

/// GET /reels
///
/// Resolves every configured reel (paced by `reels.delay_ms`) and renders
/// the grid. Unresolved thumbnails show `reels.fallback_image`.
pub async fn reels_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let reels = &state.config().reels;
    info!("Rendering reels page with {} reels", reels.urls.len());

    let results = state
        .batch()
        .resolve_all_with_delay(reels.urls.as_slice(), Duration::from_millis(reels.delay_ms))
        .await;
    let results = substitute_fallback(
        results,
        state.resolver().fallback(),
        &reels.fallback_image,
    );

    Html(render_reels_page(
        &reels.title,
        &results,
        reels.columns,
        &reels.fallback_image,
    ))
}

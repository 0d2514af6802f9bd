use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, instagram, middleware::metrics_middleware, reels};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Thumbnails
        .route(
            "/instagram",
            get(instagram::get_thumbnail).post(instagram::resolve_thumbnail),
        )
        .route("/instagram/batch", post(instagram::resolve_batch));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/reels", get(reels::reels_page))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

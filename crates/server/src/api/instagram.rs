//! Instagram thumbnail API handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use reelthumb_core::{substitute_fallback, ThumbnailResult};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    /// Any JSON value; only non-empty strings can resolve to a thumbnail.
    #[serde(default)]
    pub reel_url: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ThumbnailQuery {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(default)]
    pub reel_urls: Vec<String>,
    /// Pause between lookups; capped at `batch.max_delay_ms`.
    #[serde(default)]
    pub delay_ms: Option<u64>,
    /// Replaces the resolver's fallback image in the results.
    #[serde(default)]
    pub fallback_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ThumbnailResponse {
    pub thumbnail: String,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<ThumbnailResult>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            thumbnail: None,
        }),
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// What a POST body's `reelUrl` asks for.
#[derive(Debug, PartialEq, Eq)]
enum RequestedReel {
    /// Absent, null, `false`, `0` or a blank string.
    Missing,
    Url(String),
    /// Present but not a string; cannot name a reel.
    NotAUrl,
}

impl From<Option<Value>> for RequestedReel {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => RequestedReel::Missing,
            Some(Value::String(s)) if s.trim().is_empty() => RequestedReel::Missing,
            Some(Value::String(s)) => RequestedReel::Url(s),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => RequestedReel::Missing,
            Some(_) => RequestedReel::NotAUrl,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/instagram
///
/// Resolve the thumbnail for `{"reelUrl": "..."}`. An unreadable body is
/// answered with 500 and the fallback image.
pub async fn resolve_thumbnail(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ThumbnailRequest>, JsonRejection>,
) -> Result<Json<ThumbnailResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        error!("Error in Instagram API route: {}", e.body_text());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to fetch thumbnail".to_string(),
                thumbnail: Some(state.resolver().fallback().to_string()),
            }),
        )
    })?;

    let thumbnail = match RequestedReel::from(body.reel_url) {
        RequestedReel::Missing => return Err(bad_request("reelUrl is required")),
        RequestedReel::Url(reel_url) => state.resolver().resolve(&reel_url).await,
        RequestedReel::NotAUrl => {
            warn!("reelUrl is not a string, returning fallback");
            state.resolver().fallback().to_string()
        }
    };

    Ok(Json(ThumbnailResponse { thumbnail }))
}

/// GET /api/v1/instagram?url=...
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ThumbnailQuery>,
) -> Result<Json<ThumbnailResponse>, ApiError> {
    let url = non_empty(query.url).ok_or_else(|| bad_request("url parameter is required"))?;

    let thumbnail = state.resolver().resolve(&url).await;
    Ok(Json(ThumbnailResponse { thumbnail }))
}

/// POST /api/v1/instagram/batch
///
/// Resolve a list of reel URLs sequentially with pacing. Results keep the
/// request order.
pub async fn resolve_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| bad_request(e.body_text()))?;
    let limits = &state.config().batch;

    if body.reel_urls.is_empty() {
        return Err(bad_request("reelUrls is required"));
    }
    if body.reel_urls.len() > limits.max_urls {
        return Err(bad_request(format!(
            "Too many reelUrls: {} (max {})",
            body.reel_urls.len(),
            limits.max_urls
        )));
    }

    let delay_ms = body
        .delay_ms
        .unwrap_or(limits.delay_ms)
        .min(limits.max_delay_ms);

    info!(
        "Batch request for {} reels (delay {}ms)",
        body.reel_urls.len(),
        delay_ms
    );
    let results = state
        .batch()
        .resolve_all_with_delay(body.reel_urls.as_slice(), Duration::from_millis(delay_ms))
        .await;

    let results = match non_empty(body.fallback_image) {
        Some(replacement) => {
            substitute_fallback(results, state.resolver().fallback(), &replacement)
        }
        None => results,
    };

    Ok(Json(BatchResponse { results }))
}

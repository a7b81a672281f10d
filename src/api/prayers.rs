//! Admin prayer wall endpoints
//!
//! Moderation of the public wall: review incoming requests, release
//! them, or remove them. Mounted behind the admin-only gate.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;

use super::middleware::{ApiError, AppState, AuthedContext};
use crate::models::PrayerRequest;

/// Build the admin prayers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}/approve", post(approve))
        .route("/{id}", axum::routing::delete(remove))
}

/// Queue view: pending requests first, the live wall after.
#[derive(Debug, Serialize)]
struct PrayerQueue {
    pending: Vec<PrayerRequest>,
    approved: Vec<PrayerRequest>,
}

/// GET /api/admin/prayers
async fn list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
) -> Result<Json<PrayerQueue>, ApiError> {
    let all = match state.prayers.list_all(&ctx.session.api_token).await {
        Ok(list) => list,
        Err(error) => return Err(state.backend_error(&ctx.session.id, error).await),
    };

    let (approved, pending): (Vec<_>, Vec<_>) = all.into_iter().partition(|p| p.is_approved);
    Ok(Json(PrayerQueue { pending, approved }))
}

/// POST /api/admin/prayers/{id}/approve
async fn approve(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Err(error) = state.prayers.approve(&ctx.session.api_token, id).await {
        return Err(state.backend_error(&ctx.session.id, error).await);
    }
    tracing::info!(prayer_id = id, by = ctx.user.id, "prayer request approved");
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// DELETE /api/admin/prayers/{id}
async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Err(error) = state.prayers.remove(&ctx.session.api_token, id).await {
        return Err(state.backend_error(&ctx.session.id, error).await);
    }
    tracing::info!(prayer_id = id, by = ctx.user.id, "prayer request removed");
    Ok(Json(serde_json::json!({ "ok": true })))
}

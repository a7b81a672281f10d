//! Admin history timeline endpoints
//!
//! CRUD over the "Our History" milestones. Reads are open to any
//! authenticated user; writes need the manager role.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::middleware::{ApiError, AppState, AuthedContext};
use crate::models::{HistoryEvent, HistoryEventInput};

/// Build the admin history router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(detail).put(update).delete(remove))
}

/// Request body for creating or replacing a history event.
#[derive(Debug, Deserialize)]
struct HistoryBody {
    date: NaiveDate,
    title: String,
    description: String,
}

impl HistoryBody {
    fn into_input(self) -> Result<HistoryEventInput, ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation_error("A title is required"));
        }
        Ok(HistoryEventInput {
            date: self.date,
            title: self.title,
            description: self.description,
        })
    }
}

fn require_manager(ctx: &AuthedContext) -> Result<(), ApiError> {
    if ctx.user.is_manager() {
        Ok(())
    } else {
        Err(ApiError::forbidden("Manager privileges required"))
    }
}

/// GET /api/admin/history
async fn list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
) -> Result<Json<Vec<HistoryEvent>>, ApiError> {
    match state.history.list().await {
        Ok(events) => Ok(Json(events)),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// GET /api/admin/history/{id}
async fn detail(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<HistoryEvent>, ApiError> {
    match state.history.get(&ctx.session.api_token, id).await {
        Ok(event) => Ok(Json(event)),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// POST /api/admin/history
async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Json(body): Json<HistoryBody>,
) -> Result<Json<HistoryEvent>, ApiError> {
    require_manager(&ctx)?;
    let input = body.into_input()?;
    match state.history.create(&ctx.session.api_token, input).await {
        Ok(event) => Ok(Json(event)),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// PUT /api/admin/history/{id}
async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
    Json(body): Json<HistoryBody>,
) -> Result<Json<HistoryEvent>, ApiError> {
    require_manager(&ctx)?;
    let input = body.into_input()?;
    match state.history.update(&ctx.session.api_token, id, input).await {
        Ok(event) => Ok(Json(event)),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// DELETE /api/admin/history/{id}
async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_manager(&ctx)?;
    if let Err(error) = state.history.remove(&ctx.session.api_token, id).await {
        return Err(state.backend_error(&ctx.session.id, error).await);
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

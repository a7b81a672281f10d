//! Admin FAQ endpoints
//!
//! Plain CRUD. Reads are open to any authenticated user; writes need
//! the manager role.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::str::FromStr;

use super::middleware::{ApiError, AppState, AuthedContext};
use crate::models::{Faq, FaqCategory, FaqInput};

/// Build the admin FAQ router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(detail).put(update).delete(remove))
}

/// Request body for creating or replacing an FAQ entry.
#[derive(Debug, Deserialize)]
struct FaqBody {
    question: String,
    answer: String,
    category: String,
    #[serde(default)]
    order: i32,
}

impl FaqBody {
    fn into_input(self) -> Result<FaqInput, ApiError> {
        if self.question.trim().is_empty() {
            return Err(ApiError::validation_error("A question is required"));
        }
        if self.answer.trim().is_empty() {
            return Err(ApiError::validation_error("An answer is required"));
        }
        let category = FaqCategory::from_str(&self.category)
            .map_err(|_| ApiError::validation_error(format!("Unknown category '{}'", self.category)))?;
        Ok(FaqInput {
            question: self.question,
            answer: self.answer,
            category,
            order: self.order,
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

/// GET /api/admin/faqs
async fn list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
) -> Result<Json<Vec<Faq>>, ApiError> {
    match state.faqs.list().await {
        Ok(mut faqs) => {
            crate::models::faq::sort_for_display(&mut faqs);
            Ok(Json(faqs))
        }
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// GET /api/admin/faqs/{id}
async fn detail(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<Faq>, ApiError> {
    match state.faqs.get(&ctx.session.api_token, id).await {
        Ok(faq) => Ok(Json(faq)),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// POST /api/admin/faqs
async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Json(body): Json<FaqBody>,
) -> Result<Json<Faq>, ApiError> {
    require_manager(&ctx)?;
    let input = body.into_input()?;
    match state.faqs.create(&ctx.session.api_token, input).await {
        Ok(faq) => Ok(Json(faq)),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// PUT /api/admin/faqs/{id}
async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
    Json(body): Json<FaqBody>,
) -> Result<Json<Faq>, ApiError> {
    require_manager(&ctx)?;
    let input = body.into_input()?;
    match state.faqs.update(&ctx.session.api_token, id, input).await {
        Ok(faq) => Ok(Json(faq)),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// DELETE /api/admin/faqs/{id}
async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_manager(&ctx)?;
    if let Err(error) = state.faqs.remove(&ctx.session.api_token, id).await {
        return Err(state.backend_error(&ctx.session.id, error).await);
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

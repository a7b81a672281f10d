//! Admin user management endpoints
//!
//! Account CRUD over the backend. Mounted behind the admin-only gate;
//! passwords are write-only and never appear in responses.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use super::auth::UserResponse;
use super::middleware::{ApiError, AppState, AuthedContext};
use crate::models::{user::DEPARTMENTS, CreateUserInput, EditUserInput};

/// Build the admin users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(detail).patch(update).delete(remove))
}

fn validate_department(department: &str) -> Result<(), ApiError> {
    if DEPARTMENTS.contains(&department) {
        Ok(())
    } else {
        Err(ApiError::validation_error(format!(
            "Unknown department '{}'",
            department
        )))
    }
}

/// GET /api/admin/users
async fn list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    match state.users.list(&ctx.session.api_token).await {
        Ok(users) => Ok(Json(users.into_iter().map(UserResponse::from).collect())),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// GET /api/admin/users/{id}
async fn detail(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    match state.users.get(&ctx.session.api_token, id).await {
        Ok(user) => Ok(Json(user.into())),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
struct CreateUserBody {
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    password: String,
    #[serde(default = "default_department")]
    department: String,
}

fn default_department() -> String {
    "HQ".to_string()
}

/// POST /api/admin/users
async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Json(body): Json<CreateUserBody>,
) -> Result<Json<UserResponse>, ApiError> {
    if body.username.trim().is_empty() {
        return Err(ApiError::validation_error("A username is required"));
    }
    if body.password.len() < 8 {
        return Err(ApiError::validation_error("Password must be at least 8 characters"));
    }
    validate_department(&body.department)?;

    let input = CreateUserInput {
        username: body.username,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        password: body.password,
        department: body.department,
    };

    match state.users.create(&ctx.session.api_token, input).await {
        Ok(user) => {
            tracing::info!(username = %user.username, by = ctx.user.id, "user account created");
            Ok(Json(user.into()))
        }
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// Request body for editing an account (PATCH semantics).
#[derive(Debug, Default, Deserialize)]
struct EditUserBody {
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
    department: Option<String>,
}

/// PATCH /api/admin/users/{id}
async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
    Json(body): Json<EditUserBody>,
) -> Result<Json<UserResponse>, ApiError> {
    if let Some(ref department) = body.department {
        validate_department(department)?;
    }
    if let Some(ref password) = body.password {
        if password.len() < 8 {
            return Err(ApiError::validation_error("Password must be at least 8 characters"));
        }
    }

    let input = EditUserInput {
        username: body.username,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        password: body.password,
        department: body.department,
    };

    match state.users.update(&ctx.session.api_token, id, input).await {
        Ok(user) => Ok(Json(user.into())),
        Err(error) => Err(state.backend_error(&ctx.session.id, error).await),
    }
}

/// DELETE /api/admin/users/{id}
async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if id == ctx.user.id {
        return Err(ApiError::validation_error("You cannot delete your own account"));
    }
    if let Err(error) = state.users.remove(&ctx.session.api_token, id).await {
        return Err(state.backend_error(&ctx.session.id, error).await);
    }
    tracing::info!(user_id = id, by = ctx.user.id, "user account deleted");
    Ok(Json(serde_json::json!({ "ok": true })))
}

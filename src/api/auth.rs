//! Admin authentication endpoints
//!
//! - POST /api/admin/login  - proxy credentials to the backend, open a
//!   portal session on success
//! - POST /api/admin/logout - destroy the session
//! - GET  /api/admin/session - current user behind the session cookie
//!
//! Three failed logins lock the username out for a window; the
//! response tells the form to give up and send the visitor home,
//! matching the login screen's behavior.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::middleware::{ApiError, AppState, AuthedContext, SESSION_COOKIE};
use crate::backend::BackendError;
use crate::models::User;

/// Build the public auth routes (no session required).
pub fn public_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Build the protected auth routes.
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/session", get(session_info))
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for user info
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub department: Option<String>,
    /// Resolved manager role, so the dashboard does not re-derive it
    pub is_manager: bool,
    /// Resolved admin-section access
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let is_manager = user.is_manager();
        let is_admin = user.is_admin();
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            department: user.department,
            is_manager,
            is_admin,
        }
    }
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
}

fn session_cookie(value: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, value
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}

fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Err(ApiError::validation_error("Username and password are required"));
    }

    if state.login_attempts.is_locked(username).await {
        return Err(locked_error());
    }

    let token = match state.auth.login(username, &body.password).await {
        Ok(token) => token,
        Err(BackendError::Unauthorized)
        | Err(BackendError::Forbidden)
        | Err(BackendError::Rejected(_)) => {
            let locked = state.login_attempts.record_failure(username).await;
            tracing::warn!(%username, locked, "failed admin login");
            if locked {
                return Err(locked_error());
            }
            return Err(ApiError::with_details(
                "LOGIN_FAILED",
                "Invalid username or password",
                serde_json::json!({ "locked": false }),
            ));
        }
        Err(error) => return Err(error.into()),
    };

    state.login_attempts.clear(username).await;

    // Resolve the user right away so the dashboard gets its role flags
    // with the login response.
    let user = state.auth.me(&token).await?;

    let session = state
        .sessions
        .create(token, user.username.clone())
        .await;
    tracing::info!(username = %user.username, "admin login");

    let mut response = Json(LoginResponse { user: user.into() }).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, session_cookie(&session.id));
    Ok(response)
}

fn locked_error() -> ApiError {
    ApiError::with_details(
        "LOGIN_LOCKED",
        "Too many failed attempts, try again later",
        serde_json::json!({ "locked": true, "redirect": "/" }),
    )
}

/// POST /api/admin/logout
async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
) -> Response {
    state.sessions.destroy(&ctx.session.id).await;
    state.moderation.forget(&ctx.session.id).await;
    tracing::info!(username = %ctx.user.username, "admin logout");

    let mut response = Json(serde_json::json!({ "ok": true })).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, clear_session_cookie());
    response
}

/// GET /api/admin/session
async fn session_info(Extension(ctx): Extension<AuthedContext>) -> Json<LoginResponse> {
    Json(LoginResponse {
        user: ctx.user.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_resolves_roles() {
        let user = User {
            id: 1,
            username: "hq".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            is_superuser: false,
            department: Some("HQ".to_string()),
        };
        let response = UserResponse::from(user);
        assert!(response.is_manager);
        assert!(!response.is_admin);
    }

    #[test]
    fn test_session_cookie_format() {
        let value = session_cookie("abc");
        let value = value.to_str().unwrap();
        assert!(value.starts_with("ada_session=abc"));
        assert!(value.contains("HttpOnly"));

        let cleared = clear_session_cookie();
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
    }
}

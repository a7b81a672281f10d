//! API middleware
//!
//! The auth guard for the admin area plus the shared application
//! state and error envelope. The guard runs once per protected
//! request: it resolves the session cookie, enforces the inactivity
//! timeout, validates the stored credential by fetching the current
//! user, and injects the result for handlers downstream.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backend::{
    AuthApi, BackendError, FaqsApi, HistoryApi, PrayersApi, UpdatesApi, UsersApi,
};
use crate::models::{PortalSession, User};
use crate::provider::{EventsProvider, GeoIpClient, LocationsProvider};
use crate::services::moderation::ActionError;
use crate::services::{LoginAttempts, ModerationService, SessionStore};

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "ada_session";

/// Name of the language cookie used by the public pages.
pub const LANG_COOKIE: &str = "lang";

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthApi>,
    pub updates: Arc<dyn UpdatesApi>,
    pub faqs: Arc<dyn FaqsApi>,
    pub history: Arc<dyn HistoryApi>,
    pub prayers: Arc<dyn PrayersApi>,
    pub users: Arc<dyn UsersApi>,
    pub moderation: Arc<ModerationService>,
    pub sessions: Arc<SessionStore>,
    pub login_attempts: Arc<LoginAttempts>,
    pub events_provider: Arc<EventsProvider>,
    pub locations_provider: Arc<LocationsProvider>,
    pub geoip: Arc<GeoIpClient>,
    pub tera: Arc<tera::Tera>,
}

impl AppState {
    /// Convert a backend error into an API error, tearing the portal
    /// session down first when the backend rejected the credential.
    /// Every resource call in the admin handlers routes its errors
    /// through here so 401 handling stays uniform.
    pub async fn backend_error(&self, session_id: &str, error: BackendError) -> ApiError {
        if error.is_auth_failure() {
            self.sessions.destroy(session_id).await;
            self.moderation.forget(session_id).await;
        }
        ApiError::from(error)
    }
}

/// Authenticated request context injected by [`require_auth`].
#[derive(Clone)]
pub struct AuthedContext {
    /// The live portal session (countdown already reset)
    pub session: PortalSession,
    /// Current user, validated against the backend this request
    pub user: User,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// 401 with the reason code the login view consumes. `reason` is
    /// `timeout` after an inactivity expiry, `unauthenticated`
    /// otherwise; the dashboard redirects to
    /// `/admin/login?reason=<reason>`.
    pub fn unauthorized(reason: &str) -> Self {
        Self::with_details(
            "UNAUTHORIZED",
            "Authentication required",
            serde_json::json!({
                "reason": reason,
                "redirect": format!("/admin/login?reason={}", reason),
            }),
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new("BACKEND_UNAVAILABLE", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" | "LOGIN_FAILED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "LOGIN_LOCKED" => StatusCode::TOO_MANY_REQUESTS,
            "BACKEND_UNAVAILABLE" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Unauthorized => ApiError::unauthorized("unauthenticated"),
            BackendError::Forbidden => ApiError::forbidden("The backend denied access"),
            BackendError::NotFound => ApiError::not_found("Entity not found"),
            BackendError::Rejected(message) => ApiError::validation_error(message),
            BackendError::Transport(e) => {
                tracing::error!(error = %e, "backend transport failure");
                ApiError::bad_gateway("The backend is unreachable, please retry")
            }
            BackendError::Unexpected { status } => {
                tracing::error!(status, "unexpected backend response");
                ApiError::bad_gateway(format!("Backend answered HTTP {}", status))
            }
        }
    }
}

impl From<Arc<BackendError>> for ApiError {
    fn from(error: Arc<BackendError>) -> Self {
        match error.as_ref() {
            BackendError::Unauthorized => ApiError::unauthorized("unauthenticated"),
            BackendError::Forbidden => ApiError::forbidden("The backend denied access"),
            BackendError::NotFound => ApiError::not_found("Entity not found"),
            BackendError::Rejected(message) => ApiError::validation_error(message.clone()),
            BackendError::Transport(e) => {
                tracing::error!(error = %e, "backend transport failure");
                ApiError::bad_gateway("The backend is unreachable, please retry")
            }
            BackendError::Unexpected { status } => {
                ApiError::bad_gateway(format!("Backend answered HTTP {}", status))
            }
        }
    }
}

impl From<crate::services::moderation::ModerationError> for ApiError {
    fn from(error: crate::services::moderation::ModerationError) -> Self {
        use crate::services::moderation::ModerationError;
        match error {
            ModerationError::NotPermitted { .. } => ApiError::forbidden(error.to_string()),
            ModerationError::InvalidTransition { .. } | ModerationError::MissingReason => {
                ApiError::validation_error(error.to_string())
            }
        }
    }
}

impl From<ActionError> for ApiError {
    fn from(error: ActionError) -> Self {
        match error {
            ActionError::Workflow(e) => e.into(),
            ActionError::Backend(e) => e.into(),
        }
    }
}

/// Extract a named cookie from a request.
pub fn extract_cookie(request: &Request, name: &str) -> Option<String> {
    extract_cookie_from_headers(request.headers(), name)
}

/// Extract a named cookie from a header map.
pub fn extract_cookie_from_headers(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;
    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
            return Some(value.to_string());
        }
    }
    None
}

/// Authentication middleware for the admin area.
///
/// Exactly one validated current-user fetch happens here per request;
/// role flags from it gate every manager-only affordance downstream.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id =
        extract_cookie(&request, SESSION_COOKIE).ok_or_else(|| ApiError::unauthorized("unauthenticated"))?;

    // Resets the inactivity countdown, or reports `timeout` when the
    // session idled out.
    let session = state
        .sessions
        .touch(&session_id)
        .await
        .map_err(|rejection| ApiError::unauthorized(rejection.reason()))?;

    // Validate the stored credential against the backend.
    let user = match state.auth.me(&session.api_token).await {
        Ok(user) => user,
        Err(error) => return Err(state.backend_error(&session.id, error).await),
    };

    request.extensions_mut().insert(AuthedContext { session, user });
    Ok(next.run(request).await)
}

/// Authorization middleware for the admin-only sections (prayer
/// moderation, user management).
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let ctx = request
        .extensions()
        .get::<AuthedContext>()
        .ok_or_else(|| ApiError::unauthorized("unauthenticated"))?;

    if !ctx.user.is_admin() {
        return Err(ApiError::forbidden("Administrator privileges required"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_cookie(value: &str) -> Request<Body> {
        Request::builder()
            .uri("/test")
            .header(header::COOKIE, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_cookie() {
        let request = request_with_cookie("ada_session=abc123");
        assert_eq!(extract_cookie(&request, SESSION_COOKIE), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_cookie_among_several() {
        let request = request_with_cookie("lang=pt; ada_session=abc123; theme=dark");
        assert_eq!(extract_cookie(&request, SESSION_COOKIE), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&request, LANG_COOKIE), Some("pt".to_string()));
    }

    #[test]
    fn test_extract_cookie_missing() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        assert!(extract_cookie(&request, SESSION_COOKIE).is_none());
    }

    #[test]
    fn test_extract_cookie_prefix_is_not_a_match() {
        let request = request_with_cookie("ada_session_old=zzz");
        assert!(extract_cookie(&request, SESSION_COOKIE).is_none());
    }

    #[test]
    fn test_unauthorized_carries_reason_and_redirect() {
        let error = ApiError::unauthorized("timeout");
        assert_eq!(error.error.code, "UNAUTHORIZED");
        let details = error.error.details.unwrap();
        assert_eq!(details["reason"], "timeout");
        assert_eq!(details["redirect"], "/admin/login?reason=timeout");
    }

    #[test]
    fn test_backend_error_mapping() {
        let error = ApiError::from(BackendError::NotFound);
        assert_eq!(error.error.code, "NOT_FOUND");

        let error = ApiError::from(BackendError::Rejected("title: required".to_string()));
        assert_eq!(error.error.code, "VALIDATION_ERROR");
        assert_eq!(error.error.message, "title: required");

        let error = ApiError::from(BackendError::Unauthorized);
        assert_eq!(error.error.code, "UNAUTHORIZED");
    }
}

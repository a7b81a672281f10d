//! API layer - HTTP handlers and routing
//!
//! Two surfaces share one router:
//! - the public site: server-rendered pages under `/`
//! - the admin dashboard API under `/api/admin`, session-guarded, with
//!   the prayer and user sections additionally behind the admin gate

pub mod auth;
pub mod faqs;
pub mod history;
pub mod middleware;
pub mod pages;
pub mod prayers;
pub mod updates;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthedContext};

/// Build the admin API router (mounted at /api/admin).
fn build_admin_router(state: AppState) -> Router<AppState> {
    // Sections visible to staff/superusers only.
    let admin_only = Router::new()
        .nest("/prayers", prayers::router())
        .nest("/users", users::router())
        .route_layer(axum_middleware::from_fn(middleware::require_admin));

    // Everything session-guarded.
    let protected = Router::new()
        .nest("/updates", updates::router())
        .nest("/faqs", faqs::router())
        .nest("/history", history::router())
        .merge(auth::protected_router())
        .merge(admin_only)
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new().merge(auth::public_router()).merge(protected)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000")),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .merge(pages::router())
        .nest("/api/admin", build_admin_router(state.clone()))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Backend resource clients
//!
//! Typed clients over the church backend's REST API, one per resource,
//! behind traits so the admin handlers and the moderation workflow can
//! be exercised against in-memory fakes. The HTTP implementations
//! share one [`HttpBackend`] wrapper that attaches the bearer
//! credential and maps error responses into [`BackendError`].
//!
//! Failure semantics are uniform across every client: a 401 means the
//! stored credential is no longer valid and the caller must tear the
//! portal session down; any non-2xx leaves local state unchanged.

pub mod auth;
pub mod faqs;
pub mod history;
pub mod http;
pub mod prayers;
pub mod updates;
pub mod users;

pub use auth::{AuthApi, HttpAuthApi};
pub use faqs::{FaqsApi, HttpFaqsApi};
pub use history::{HistoryApi, HttpHistoryApi};
pub use http::HttpBackend;
pub use prayers::{HttpPrayersApi, PrayersApi};
pub use updates::{HttpUpdatesApi, UpdatesApi};
pub use users::{HttpUsersApi, UsersApi};

/// Error returned by every backend client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The credential was missing, invalid or expired (HTTP 401).
    /// Callers must clear the portal session.
    #[error("Backend rejected the credential")]
    Unauthorized,

    /// The credential is valid but lacks permission (HTTP 403)
    #[error("Backend denied access")]
    Forbidden,

    /// The entity does not exist (HTTP 404), e.g. editing an update
    /// another moderator already removed
    #[error("Entity not found")]
    NotFound,

    /// A validation or business failure (other 4xx); the message comes
    /// from the response body and is safe to surface
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The request never completed
    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other unexpected response
    #[error("Unexpected backend response: HTTP {status}")]
    Unexpected { status: u16 },
}

impl BackendError {
    /// Whether this error must tear down the portal session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, BackendError::Unauthorized)
    }
}

//! Prayer requests client

use async_trait::async_trait;

use super::{BackendError, HttpBackend};
use crate::models::{CreatePrayerInput, PrayerRequest};

/// Prayer request operations against the backend.
#[async_trait]
pub trait PrayersApi: Send + Sync {
    /// Public wall: approved requests only.
    async fn list_public(&self) -> Result<Vec<PrayerRequest>, BackendError>;

    /// Admin view: every request, pending ones included.
    async fn list_all(&self, token: &str) -> Result<Vec<PrayerRequest>, BackendError>;

    /// Submit a request from the public wall. It starts unapproved.
    async fn create(&self, input: CreatePrayerInput) -> Result<PrayerRequest, BackendError>;

    /// Release a request onto the public wall.
    async fn approve(&self, token: &str, id: i64) -> Result<(), BackendError>;

    /// "Prayed for this": fire-and-forget increment.
    async fn like(&self, id: i64) -> Result<(), BackendError>;

    /// Remove a request entirely.
    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError>;
}

/// HTTP implementation of [`PrayersApi`].
#[derive(Debug, Clone)]
pub struct HttpPrayersApi {
    backend: HttpBackend,
}

impl HttpPrayersApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl PrayersApi for HttpPrayersApi {
    async fn list_public(&self) -> Result<Vec<PrayerRequest>, BackendError> {
        self.backend.get_json("prayers/", None).await
    }

    async fn list_all(&self, token: &str) -> Result<Vec<PrayerRequest>, BackendError> {
        self.backend
            .get_json("prayers/?admin=true", Some(token))
            .await
    }

    async fn create(&self, input: CreatePrayerInput) -> Result<PrayerRequest, BackendError> {
        self.backend.post_json("prayers/", None, &input).await
    }

    async fn approve(&self, token: &str, id: i64) -> Result<(), BackendError> {
        self.backend
            .post_empty(&format!("prayers/{}/approve/", id), Some(token))
            .await
    }

    async fn like(&self, id: i64) -> Result<(), BackendError> {
        self.backend
            .post_empty(&format!("prayers/{}/like/", id), None)
            .await
    }

    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError> {
        self.backend
            .delete(&format!("prayers/{}/", id), Some(token))
            .await
    }
}

//! History timeline client

use async_trait::async_trait;

use super::{BackendError, HttpBackend};
use crate::models::{HistoryEvent, HistoryEventInput};

/// History timeline operations against the backend.
#[async_trait]
pub trait HistoryApi: Send + Sync {
    async fn list(&self) -> Result<Vec<HistoryEvent>, BackendError>;
    async fn get(&self, token: &str, id: i64) -> Result<HistoryEvent, BackendError>;
    async fn create(
        &self,
        token: &str,
        input: HistoryEventInput,
    ) -> Result<HistoryEvent, BackendError>;
    async fn update(
        &self,
        token: &str,
        id: i64,
        input: HistoryEventInput,
    ) -> Result<HistoryEvent, BackendError>;
    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError>;
}

/// HTTP implementation of [`HistoryApi`].
#[derive(Debug, Clone)]
pub struct HttpHistoryApi {
    backend: HttpBackend,
}

impl HttpHistoryApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl HistoryApi for HttpHistoryApi {
    async fn list(&self) -> Result<Vec<HistoryEvent>, BackendError> {
        self.backend.get_json("history/", None).await
    }

    async fn get(&self, token: &str, id: i64) -> Result<HistoryEvent, BackendError> {
        self.backend
            .get_json(&format!("history/{}/", id), Some(token))
            .await
    }

    async fn create(
        &self,
        token: &str,
        input: HistoryEventInput,
    ) -> Result<HistoryEvent, BackendError> {
        self.backend.post_json("history/", Some(token), &input).await
    }

    async fn update(
        &self,
        token: &str,
        id: i64,
        input: HistoryEventInput,
    ) -> Result<HistoryEvent, BackendError> {
        self.backend
            .put_json(&format!("history/{}/", id), Some(token), &input)
            .await
    }

    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError> {
        self.backend
            .delete(&format!("history/{}/", id), Some(token))
            .await
    }
}

//! FAQ client

use async_trait::async_trait;

use super::{BackendError, HttpBackend};
use crate::models::{Faq, FaqInput};

/// FAQ operations against the backend.
#[async_trait]
pub trait FaqsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Faq>, BackendError>;
    async fn get(&self, token: &str, id: i64) -> Result<Faq, BackendError>;
    async fn create(&self, token: &str, input: FaqInput) -> Result<Faq, BackendError>;
    async fn update(&self, token: &str, id: i64, input: FaqInput) -> Result<Faq, BackendError>;
    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError>;
}

/// HTTP implementation of [`FaqsApi`].
#[derive(Debug, Clone)]
pub struct HttpFaqsApi {
    backend: HttpBackend,
}

impl HttpFaqsApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl FaqsApi for HttpFaqsApi {
    async fn list(&self) -> Result<Vec<Faq>, BackendError> {
        self.backend.get_json("faqs/", None).await
    }

    async fn get(&self, token: &str, id: i64) -> Result<Faq, BackendError> {
        self.backend
            .get_json(&format!("faqs/{}/", id), Some(token))
            .await
    }

    async fn create(&self, token: &str, input: FaqInput) -> Result<Faq, BackendError> {
        self.backend.post_json("faqs/", Some(token), &input).await
    }

    async fn update(&self, token: &str, id: i64, input: FaqInput) -> Result<Faq, BackendError> {
        self.backend
            .put_json(&format!("faqs/{}/", id), Some(token), &input)
            .await
    }

    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError> {
        self.backend
            .delete(&format!("faqs/{}/", id), Some(token))
            .await
    }
}

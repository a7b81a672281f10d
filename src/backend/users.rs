//! User accounts client

use async_trait::async_trait;

use super::{BackendError, HttpBackend};
use crate::models::{CreateUserInput, EditUserInput, User};

/// User account operations against the backend. Admin-only on the
/// portal side; the backend enforces the same.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list(&self, token: &str) -> Result<Vec<User>, BackendError>;
    async fn get(&self, token: &str, id: i64) -> Result<User, BackendError>;
    async fn create(&self, token: &str, input: CreateUserInput) -> Result<User, BackendError>;
    async fn update(&self, token: &str, id: i64, input: EditUserInput)
        -> Result<User, BackendError>;
    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError>;
}

/// HTTP implementation of [`UsersApi`].
#[derive(Debug, Clone)]
pub struct HttpUsersApi {
    backend: HttpBackend,
}

impl HttpUsersApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list(&self, token: &str) -> Result<Vec<User>, BackendError> {
        self.backend.get_json("users/", Some(token)).await
    }

    async fn get(&self, token: &str, id: i64) -> Result<User, BackendError> {
        self.backend
            .get_json(&format!("users/{}/", id), Some(token))
            .await
    }

    async fn create(&self, token: &str, input: CreateUserInput) -> Result<User, BackendError> {
        self.backend.post_json("users/", Some(token), &input).await
    }

    async fn update(
        &self,
        token: &str,
        id: i64,
        input: EditUserInput,
    ) -> Result<User, BackendError> {
        self.backend
            .patch_json(&format!("users/{}/", id), Some(token), &input)
            .await
    }

    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError> {
        self.backend
            .delete(&format!("users/{}/", id), Some(token))
            .await
    }
}

//! Authentication client
//!
//! Two calls: exchange credentials for a token, and resolve the
//! current user behind a token. The portal never stores passwords;
//! login is a straight proxy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{BackendError, HttpBackend};
use crate::models::User;

/// Authentication operations against the backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange username/password for a bearer credential.
    async fn login(&self, username: &str, password: &str) -> Result<String, BackendError>;

    /// Resolve the user behind a credential. This is the validation
    /// call the auth guard makes once per protected request.
    async fn me(&self, token: &str) -> Result<User, BackendError>;
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// HTTP implementation of [`AuthApi`].
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    backend: HttpBackend,
}

impl HttpAuthApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, username: &str, password: &str) -> Result<String, BackendError> {
        let body = LoginRequest { username, password };
        let response: LoginResponse = self.backend.post_json("login/", None, &body).await?;
        Ok(response.token)
    }

    async fn me(&self, token: &str) -> Result<User, BackendError> {
        self.backend.get_json("me/", Some(token)).await
    }
}

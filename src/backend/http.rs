//! Shared HTTP plumbing for the backend clients
//!
//! One reqwest client wrapped with the backend base URL. Paths follow
//! the backend's trailing-slash convention; the credential goes out as
//! an `Authorization: Token <value>` header.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::BackendError;
use crate::config::BackendConfig;

/// Shared wrapper around the backend API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build the wrapper from configuration.
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a wrapper directly from a base URL (tests).
    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = token {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("Token {}", token));
        }
        builder
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let response = self.request(Method::GET, path, token).send().await?;
        read_json(response).await
    }

    /// POST a JSON body, expect a JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::POST, path, token)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    /// POST with an empty body (action endpoints), discard the response.
    pub async fn post_empty(&self, path: &str, token: Option<&str>) -> Result<(), BackendError> {
        let response = self.request(Method::POST, path, token).send().await?;
        read_unit(response).await
    }

    /// POST a JSON body, discard the response (action endpoints with a
    /// payload, e.g. deny reasons).
    pub async fn post_json_unit<B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, path, token)
            .json(body)
            .send()
            .await?;
        read_unit(response).await
    }

    /// PUT a JSON body, expect a JSON response.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::PUT, path, token)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    /// PATCH a JSON body, expect a JSON response.
    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::PATCH, path, token)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    /// Send a multipart form (update create/edit with an image part).
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        form: reqwest::multipart::Form,
    ) -> Result<T, BackendError> {
        let response = self
            .request(method, path, token)
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), BackendError> {
        let response = self.request(Method::DELETE, path, token).send().await?;
        read_unit(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

async fn read_unit(response: reqwest::Response) -> Result<(), BackendError> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(BackendError::Unauthorized),
        StatusCode::FORBIDDEN => Err(BackendError::Forbidden),
        StatusCode::NOT_FOUND => Err(BackendError::NotFound),
        s if s.is_client_error() => {
            let body = response.text().await.unwrap_or_default();
            Err(BackendError::Rejected(extract_message(&body)))
        }
        s => Err(BackendError::Unexpected { status: s.as_u16() }),
    }
}

/// Pull a human-readable message out of an error body. The backend
/// answers with `{"detail": "..."}` for most rejections and field maps
/// for validation errors; anything unparseable is passed through
/// truncated.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
        if let Some(map) = value.as_object() {
            let mut parts: Vec<String> = Vec::new();
            for (field, errors) in map {
                match errors {
                    serde_json::Value::Array(items) => {
                        let joined: Vec<&str> =
                            items.iter().filter_map(|i| i.as_str()).collect();
                        if !joined.is_empty() {
                            parts.push(format!("{}: {}", field, joined.join(", ")));
                        }
                    }
                    serde_json::Value::String(s) => parts.push(format!("{}: {}", field, s)),
                    _ => {}
                }
            }
            if !parts.is_empty() {
                return parts.join("; ");
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request rejected".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_detail() {
        assert_eq!(
            extract_message(r#"{"detail": "Invalid token."}"#),
            "Invalid token."
        );
    }

    #[test]
    fn test_extract_message_field_errors() {
        let message = extract_message(r#"{"title": ["This field is required."]}"#);
        assert_eq!(message, "title: This field is required.");
    }

    #[test]
    fn test_extract_message_plain_text() {
        assert_eq!(extract_message("nope"), "nope");
        assert_eq!(extract_message("  "), "Request rejected");
    }

    #[test]
    fn test_url_joining() {
        let backend = HttpBackend::with_base_url("http://localhost:8000/api/");
        assert_eq!(backend.url("/updates/"), "http://localhost:8000/api/updates/");
        assert_eq!(backend.url("me/"), "http://localhost:8000/api/me/");
    }
}

//! Updates client
//!
//! List/get/create/edit/remove plus the moderation action endpoints.
//! Create and edit switch to multipart when an image file rides along,
//! plain JSON otherwise.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use super::{BackendError, HttpBackend};
use crate::models::{CreateUpdateInput, EditUpdateInput, ImageUpload, ModerationAction, Update};

/// Update operations against the backend.
#[async_trait]
pub trait UpdatesApi: Send + Sync {
    /// Full list, every status (authenticated admin view).
    async fn list(&self, token: &str) -> Result<Vec<Update>, BackendError>;

    /// Public list; the backend returns live updates only.
    async fn list_public(&self) -> Result<Vec<Update>, BackendError>;

    /// Fetch one update.
    async fn get(&self, token: &str, id: i64) -> Result<Update, BackendError>;

    /// Create an update. The backend assigns team and entry status
    /// from the creating user.
    async fn create(&self, token: &str, input: CreateUpdateInput) -> Result<Update, BackendError>;

    /// Edit an update (PATCH semantics).
    async fn edit(
        &self,
        token: &str,
        id: i64,
        input: EditUpdateInput,
    ) -> Result<Update, BackendError>;

    /// Physically delete an update. The workflow never calls this;
    /// soft deletion goes through [`action`](UpdatesApi::action).
    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError>;

    /// Invoke a moderation action endpoint. `reason` is required for
    /// [`ModerationAction::Deny`] and ignored otherwise.
    async fn action(
        &self,
        token: &str,
        id: i64,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> Result<(), BackendError>;
}

/// HTTP implementation of [`UpdatesApi`].
#[derive(Debug, Clone)]
pub struct HttpUpdatesApi {
    backend: HttpBackend,
}

impl HttpUpdatesApi {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[derive(Debug, Serialize)]
struct DenyRequest<'a> {
    reason: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateUpdateJson<'a> {
    title: &'a str,
    description: &'a str,
    category: String,
}

fn image_part(image: ImageUpload) -> Result<Part, BackendError> {
    Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)
        .map_err(BackendError::Transport)
}

fn edit_form(input: &EditUpdateInput) -> Form {
    let mut form = Form::new();
    if let Some(ref title) = input.title {
        form = form.text("title", title.clone());
    }
    if let Some(ref description) = input.description {
        form = form.text("description", description.clone());
    }
    if let Some(category) = input.category {
        form = form.text("category", category.to_string());
    }
    if let Some(status) = input.status {
        form = form.text("status", status.to_string());
    }
    if let Some(ref reason) = input.rejection_reason {
        form = form.text("rejection_reason", reason.clone().unwrap_or_default());
    }
    form
}

#[derive(Debug, Default, Serialize)]
struct EditUpdateJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<Option<String>>,
}

impl From<&EditUpdateInput> for EditUpdateJson {
    fn from(input: &EditUpdateInput) -> Self {
        Self {
            title: input.title.clone(),
            description: input.description.clone(),
            category: input.category.map(|c| c.to_string()),
            status: input.status.map(|s| s.to_string()),
            rejection_reason: input.rejection_reason.clone(),
        }
    }
}

#[async_trait]
impl UpdatesApi for HttpUpdatesApi {
    async fn list(&self, token: &str) -> Result<Vec<Update>, BackendError> {
        self.backend.get_json("updates/", Some(token)).await
    }

    async fn list_public(&self) -> Result<Vec<Update>, BackendError> {
        self.backend.get_json("updates/", None).await
    }

    async fn get(&self, token: &str, id: i64) -> Result<Update, BackendError> {
        self.backend
            .get_json(&format!("updates/{}/", id), Some(token))
            .await
    }

    async fn create(&self, token: &str, input: CreateUpdateInput) -> Result<Update, BackendError> {
        match input.image {
            Some(image) => {
                let form = Form::new()
                    .text("title", input.title)
                    .text("description", input.description)
                    .text("category", input.category.to_string())
                    .part("image", image_part(image)?);
                self.backend
                    .send_multipart(Method::POST, "updates/", Some(token), form)
                    .await
            }
            None => {
                let body = CreateUpdateJson {
                    title: &input.title,
                    description: &input.description,
                    category: input.category.to_string(),
                };
                self.backend.post_json("updates/", Some(token), &body).await
            }
        }
    }

    async fn edit(
        &self,
        token: &str,
        id: i64,
        input: EditUpdateInput,
    ) -> Result<Update, BackendError> {
        let path = format!("updates/{}/", id);
        match input.image {
            Some(ref image) => {
                let form = edit_form(&input).part("image", image_part(image.clone())?);
                self.backend
                    .send_multipart(Method::PATCH, &path, Some(token), form)
                    .await
            }
            None => {
                let body = EditUpdateJson::from(&input);
                self.backend.patch_json(&path, Some(token), &body).await
            }
        }
    }

    async fn remove(&self, token: &str, id: i64) -> Result<(), BackendError> {
        self.backend
            .delete(&format!("updates/{}/", id), Some(token))
            .await
    }

    async fn action(
        &self,
        token: &str,
        id: i64,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> Result<(), BackendError> {
        let path = format!("updates/{}/{}/", id, action.endpoint());
        match action {
            ModerationAction::Deny => {
                let reason = reason.unwrap_or_default();
                self.backend
                    .post_json_unit(&path, Some(token), &DenyRequest { reason })
                    .await
            }
            _ => self.backend.post_empty(&path, Some(token)).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UpdateCategory, UpdateStatus};

    #[test]
    fn test_edit_json_clears_rejection_reason() {
        let input = EditUpdateInput {
            status: Some(UpdateStatus::Pending),
            rejection_reason: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(EditUpdateJson::from(&input)).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json["rejection_reason"].is_null());
        assert!(json.as_object().unwrap().contains_key("rejection_reason"));
    }

    #[test]
    fn test_edit_json_omits_untouched_fields() {
        let input = EditUpdateInput {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(EditUpdateJson::from(&input)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(json["title"], "New title");
    }

    #[test]
    fn test_edit_json_category_wire_name() {
        let input = EditUpdateInput {
            category: Some(UpdateCategory::Apostle),
            ..Default::default()
        };
        let json = serde_json::to_value(EditUpdateJson::from(&input)).unwrap();
        assert_eq!(json["category"], "apostle");
    }
}

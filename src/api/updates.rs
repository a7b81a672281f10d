//! Admin updates endpoints
//!
//! The dashboard's view of the moderation workflow:
//!
//! - GET    /            - board (status tabs, counts, action menus)
//!   plus the review popup payload, if one is due
//! - POST   /            - create an update (multipart)
//! - GET    /{id}        - one update with its action menu
//! - PATCH  /{id}        - edit (multipart; owner edits resubmit)
//! - DELETE /{id}        - physical delete, superuser only
//! - POST   /{id}/{action} - moderation action (approve, deny, ...)
//! - POST   /alerts/dismiss - "ignore for now": silence popups for
//!   the rest of the session
//!
//! The board endpoint is the single reload path: the dashboard's
//! polling timer hits it bare (served from the snapshot cache inside
//! the poll interval) and the refresh button hits it with
//! `?refresh=1`.

use axum::{
    extract::{Multipart, Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::middleware::{ApiError, AppState, AuthedContext};
use crate::models::{
    CreateUpdateInput, EditUpdateInput, ImageUpload, ModerationAction, Update, UpdateCategory,
    UpdateStatus,
};
use crate::services::moderation::{
    apply_resubmission, available_actions, next_review_alert, ReviewAlert, UpdateBoard,
};

/// Build the admin updates router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(board).post(create))
        .route("/{id}", get(detail).patch(edit).delete(remove))
        .route("/{id}/{action}", post(action))
        .route("/alerts/dismiss", post(dismiss_alerts))
}

#[derive(Debug, Deserialize)]
struct BoardQuery {
    /// Force a snapshot refresh (the dashboard's refresh button and
    /// every post-action reload)
    #[serde(default)]
    refresh: bool,
}

/// Board response: derived tabs plus at most one review popup.
#[derive(Debug, Serialize)]
struct BoardResponse {
    board: UpdateBoard,
    /// Popup to surface, already recorded in the session ledger
    review_alert: Option<ReviewAlert>,
}

/// GET /api/admin/updates
async fn board(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardResponse>, ApiError> {
    let session_id = &ctx.session.id;
    let token = &ctx.session.api_token;

    let snapshot = if query.refresh {
        state.moderation.refresh(session_id, token).await
    } else {
        state.moderation.load(session_id, token).await
    };
    let snapshot = match snapshot {
        Ok(snapshot) => snapshot,
        Err(error) => {
            if error.is_auth_failure() {
                state.sessions.destroy(session_id).await;
                state.moderation.forget(session_id).await;
            }
            return Err(ApiError::from(error));
        }
    };

    let board = UpdateBoard::build(&snapshot, &ctx.user);

    // The notification check runs against every fresh snapshot; the
    // ledger guarantees one popup per update id per session.
    let user = ctx.user.clone();
    let review_alert = state
        .sessions
        .with_ledger(session_id, |ledger| {
            next_review_alert(&snapshot, &user, ledger)
        })
        .await
        .flatten();

    Ok(Json(BoardResponse {
        board,
        review_alert,
    }))
}

/// POST /api/admin/updates/alerts/dismiss
async fn dismiss_alerts(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .sessions
        .with_ledger(&ctx.session.id, |ledger| ledger.dismiss_all())
        .await;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Detail response: the update plus its resolved action menu.
#[derive(Debug, Serialize)]
struct DetailResponse {
    #[serde(flatten)]
    update: Update,
    actions: Vec<ModerationAction>,
    is_own: bool,
}

/// GET /api/admin/updates/{id}
async fn detail(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<DetailResponse>, ApiError> {
    let update = match state.moderation.get(&ctx.session.api_token, id).await {
        Ok(update) => update,
        Err(error) => return Err(state.backend_error(&ctx.session.id, error).await),
    };

    let actions = available_actions(&update, &ctx.user);
    let is_own = update.is_owned_by(ctx.user.id);
    Ok(Json(DetailResponse {
        update,
        actions,
        is_own,
    }))
}

/// POST /api/admin/updates
async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    multipart: Multipart,
) -> Result<Json<Update>, ApiError> {
    let form = UpdateForm::from_multipart(multipart).await?;

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::validation_error("A title is required"))?;
    let description = form
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::validation_error("A description is required"))?;
    let category = form
        .category
        .ok_or_else(|| ApiError::validation_error("A category is required"))?;

    let input = CreateUpdateInput {
        title,
        description,
        category,
        image: form.image,
    };

    let created = state
        .updates
        .create(&ctx.session.api_token, input)
        .await;
    let created = match created {
        Ok(update) => update,
        Err(error) => return Err(state.backend_error(&ctx.session.id, error).await),
    };

    // The new entry must show up on the next board load.
    state.moderation.forget(&ctx.session.id).await;
    tracing::info!(update_id = created.id, by = ctx.user.id, "update created");
    Ok(Json(created))
}

/// PATCH /api/admin/updates/{id}
async fn edit(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Update>, ApiError> {
    let token = ctx.session.api_token.clone();

    // The current status decides whether this save is a resubmission;
    // a vanished update turns into the not-found redirect upstream.
    let existing = match state.updates.get(&token, id).await {
        Ok(update) => update,
        Err(error) => return Err(state.backend_error(&ctx.session.id, error).await),
    };

    let form = UpdateForm::from_multipart(multipart).await?;
    let input = EditUpdateInput {
        title: form.title.filter(|t| !t.trim().is_empty()),
        description: form.description.filter(|d| !d.trim().is_empty()),
        category: form.category,
        image: form.image,
        status: None,
        rejection_reason: None,
    };

    // Owner saving a reviewed update: back to pending, reason cleared.
    let input = apply_resubmission(&existing, &ctx.user, input);
    let resubmitted = input.status == Some(UpdateStatus::Pending);

    let saved = match state.updates.edit(&token, id, input).await {
        Ok(update) => update,
        Err(error) => return Err(state.backend_error(&ctx.session.id, error).await),
    };

    state.moderation.forget(&ctx.session.id).await;
    tracing::info!(update_id = id, by = ctx.user.id, resubmitted, "update edited");
    Ok(Json(saved))
}

/// DELETE /api/admin/updates/{id} - physical removal, superusers only.
/// The workflow's soft delete goes through the action endpoint.
async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !ctx.user.is_superuser {
        return Err(ApiError::forbidden("Only superusers may permanently delete updates"));
    }

    if let Err(error) = state.updates.remove(&ctx.session.api_token, id).await {
        return Err(state.backend_error(&ctx.session.id, error).await);
    }
    state.moderation.forget(&ctx.session.id).await;
    tracing::info!(update_id = id, by = ctx.user.id, "update permanently deleted");
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Debug, Default, Deserialize)]
struct ActionBody {
    reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct ActionResponse {
    id: i64,
    status: UpdateStatus,
}

/// POST /api/admin/updates/{id}/{action}
///
/// The body is optional: only `deny` carries a JSON payload with the
/// rejection reason.
async fn action(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthedContext>,
    Path((id, action_name)): Path<(i64, String)>,
    body: axum::body::Bytes,
) -> Result<Json<ActionResponse>, ApiError> {
    let action = ModerationAction::from_str(&action_name)
        .map_err(|_| ApiError::not_found(format!("Unknown action '{}'", action_name)))?;
    let reason = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<ActionBody>(&body)
            .map_err(|e| ApiError::validation_error(format!("Malformed request body: {}", e)))?
            .reason
    };

    let token = ctx.session.api_token.clone();
    let update = match state.moderation.get(&token, id).await {
        Ok(update) => update,
        Err(error) => return Err(state.backend_error(&ctx.session.id, error).await),
    };

    let outcome = state
        .moderation
        .act(
            &ctx.session.id,
            &token,
            &ctx.user,
            &update,
            action,
            reason.as_deref(),
        )
        .await;
    let target = match outcome {
        Ok(target) => target,
        Err(crate::services::moderation::ActionError::Backend(error)) => {
            return Err(state.backend_error(&ctx.session.id, error).await)
        }
        Err(error) => return Err(ApiError::from(error)),
    };

    // A moderator denying their own update never gets the popup for
    // it: the id goes straight into the ledger.
    if action == ModerationAction::Deny && update.is_owned_by(ctx.user.id) {
        state
            .sessions
            .with_ledger(&ctx.session.id, |ledger| ledger.mark_notified(id))
            .await;
    }

    Ok(Json(ActionResponse { id, status: target }))
}

/// Fields of the multipart create/edit form.
#[derive(Debug, Default)]
struct UpdateForm {
    title: Option<String>,
    description: Option<String>,
    category: Option<UpdateCategory>,
    image: Option<ImageUpload>,
}

impl UpdateForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = UpdateForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::validation_error(format!("Malformed form data: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "category" => {
                    let raw = read_text(field).await?;
                    let category = UpdateCategory::from_str(&raw)
                        .map_err(|_| ApiError::validation_error(format!("Unknown category '{}'", raw)))?;
                    form.category = Some(category);
                }
                "image" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::validation_error(format!("Image upload failed: {}", e)))?;
                    if !bytes.is_empty() {
                        form.image = Some(ImageUpload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::validation_error(format!("Malformed form field: {}", e)))
}

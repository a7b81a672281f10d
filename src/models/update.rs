//! Update model
//!
//! An Update is one piece of publishable content (news, volunteer
//! schedules, gallery uploads, the Apostle's updates). Its `status`
//! field drives the moderation workflow in `services::moderation`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Team labels an update can belong to. Mirrors the department set on
/// user accounts; the backend assigns the team from the creator's
/// department on create.
pub const TEAMS: &[&str] = &[
    "HQ",
    "Youth Ministry",
    "BOT",
    "GOQ",
    "Men of Integrity",
    "Go-Quickly",
    "Child Evangelism",
    "Apostle's Update Team",
    "FABM Team",
];

/// Update entity as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    /// Unique identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// Content category
    pub category: UpdateCategory,
    /// Image URL, if one was uploaded
    #[serde(default)]
    pub image: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Id of the creating user (null if the account was removed)
    #[serde(default)]
    pub created_by: Option<i64>,
    /// Owning team label
    #[serde(default = "default_team")]
    pub team: String,
    /// Workflow status
    #[serde(default)]
    pub status: UpdateStatus,
    /// Reason the update was returned for review (present iff status
    /// is `review`)
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

fn default_team() -> String {
    "HQ".to_string()
}

impl Update {
    /// Check whether the given user created this update.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.created_by == Some(user_id)
    }

    /// Whether the update is visible on the public site.
    pub fn is_public(&self) -> bool {
        self.status == UpdateStatus::Live
    }
}

/// Workflow status of an update.
///
/// `pending` is the entry state at creation. `deleted` is a soft
/// marker: the entity stays queryable and can be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    /// Awaiting moderation
    #[default]
    Pending,
    /// Published on the public site
    Live,
    /// Returned to its owner with a reason
    Review,
    /// Taken off the public site
    Inactive,
    /// Soft-deleted, restorable
    Deleted,
}

impl UpdateStatus {
    /// All statuses, in the order the dashboard shows its tabs.
    pub const ALL: [UpdateStatus; 5] = [
        UpdateStatus::Pending,
        UpdateStatus::Live,
        UpdateStatus::Review,
        UpdateStatus::Inactive,
        UpdateStatus::Deleted,
    ];
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStatus::Pending => write!(f, "pending"),
            UpdateStatus::Live => write!(f, "live"),
            UpdateStatus::Review => write!(f, "review"),
            UpdateStatus::Inactive => write!(f, "inactive"),
            UpdateStatus::Deleted => write!(f, "deleted"),
        }
    }
}

impl FromStr for UpdateStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(UpdateStatus::Pending),
            "live" => Ok(UpdateStatus::Live),
            "review" => Ok(UpdateStatus::Review),
            "inactive" => Ok(UpdateStatus::Inactive),
            "deleted" => Ok(UpdateStatus::Deleted),
            _ => Err(anyhow::anyhow!("Invalid update status: {}", s)),
        }
    }
}

/// Content category of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateCategory {
    /// Video content
    Video,
    /// General announcement
    Announcement,
    /// Newsletter issue
    Newsletter,
    /// Photo gallery
    Gallery,
    /// Apostle's update
    Apostle,
}

impl fmt::Display for UpdateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateCategory::Video => write!(f, "video"),
            UpdateCategory::Announcement => write!(f, "announcement"),
            UpdateCategory::Newsletter => write!(f, "newsletter"),
            UpdateCategory::Gallery => write!(f, "gallery"),
            UpdateCategory::Apostle => write!(f, "apostle"),
        }
    }
}

impl FromStr for UpdateCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(UpdateCategory::Video),
            "announcement" => Ok(UpdateCategory::Announcement),
            "newsletter" => Ok(UpdateCategory::Newsletter),
            "gallery" => Ok(UpdateCategory::Gallery),
            "apostle" => Ok(UpdateCategory::Apostle),
            _ => Err(anyhow::anyhow!("Invalid update category: {}", s)),
        }
    }
}

/// A moderation action on an update. Each maps to a dedicated action
/// endpoint on the backend; which ones are offered for a given update
/// and user is decided by `services::moderation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    /// pending → live
    Approve,
    /// pending/live/inactive → review, with a reason
    Deny,
    /// inactive/review → live
    Activate,
    /// live → inactive
    Deactivate,
    /// pending/review → deleted (soft)
    DeleteSoft,
    /// deleted → inactive
    Restore,
}

impl ModerationAction {
    /// Path segment of the backend action endpoint.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Deny => "deny",
            ModerationAction::Activate => "activate",
            ModerationAction::Deactivate => "deactivate",
            ModerationAction::DeleteSoft => "delete_soft",
            ModerationAction::Restore => "restore",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

impl FromStr for ModerationAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ModerationAction::Approve),
            "deny" => Ok(ModerationAction::Deny),
            "activate" => Ok(ModerationAction::Activate),
            "deactivate" => Ok(ModerationAction::Deactivate),
            "delete_soft" => Ok(ModerationAction::DeleteSoft),
            "restore" => Ok(ModerationAction::Restore),
            _ => Err(anyhow::anyhow!("Invalid moderation action: {}", s)),
        }
    }
}

/// Input for creating a new update.
#[derive(Debug, Clone)]
pub struct CreateUpdateInput {
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// Content category
    pub category: UpdateCategory,
    /// Raw image bytes with the original filename, if uploaded
    pub image: Option<ImageUpload>,
}

/// Input for editing an update. `None` fields are left untouched
/// (PATCH semantics on the backend).
#[derive(Debug, Clone, Default)]
pub struct EditUpdateInput {
    /// New headline
    pub title: Option<String>,
    /// New body text
    pub description: Option<String>,
    /// New category
    pub category: Option<UpdateCategory>,
    /// Replacement image
    pub image: Option<ImageUpload>,
    /// Explicit status override (used by owner resubmission)
    pub status: Option<UpdateStatus>,
    /// Explicit rejection-reason override; `Some(None)` clears it
    pub rejection_reason: Option<Option<String>>,
}

/// An uploaded image file, kept in memory until the multipart request
/// to the backend is assembled.
#[derive(Clone)]
pub struct ImageUpload {
    /// Original filename
    pub file_name: String,
    /// MIME type as declared by the browser
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &format!("{} bytes", self.bytes.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in UpdateStatus::ALL {
            let parsed = UpdateStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_from_str_case_insensitive() {
        assert_eq!(UpdateStatus::from_str("Pending").unwrap(), UpdateStatus::Pending);
        assert_eq!(UpdateStatus::from_str("LIVE").unwrap(), UpdateStatus::Live);
        assert!(UpdateStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(UpdateStatus::default(), UpdateStatus::Pending);
    }

    #[test]
    fn test_action_roundtrip() {
        for name in ["approve", "deny", "activate", "deactivate", "delete_soft", "restore"] {
            let action = ModerationAction::from_str(name).unwrap();
            assert_eq!(action.endpoint(), name);
        }
        assert!(ModerationAction::from_str("publish").is_err());
    }

    #[test]
    fn test_category_roundtrip() {
        for name in ["video", "announcement", "newsletter", "gallery", "apostle"] {
            let category = UpdateCategory::from_str(name).unwrap();
            assert_eq!(category.to_string(), name);
        }
        assert!(UpdateCategory::from_str("podcast").is_err());
    }

    #[test]
    fn test_ownership() {
        let update = Update {
            id: 1,
            title: "Youth Conference Recap".to_string(),
            description: "Highlights".to_string(),
            category: UpdateCategory::Announcement,
            image: None,
            created_at: Utc::now(),
            created_by: Some(7),
            team: "Youth Ministry".to_string(),
            status: UpdateStatus::Pending,
            rejection_reason: None,
        };

        assert!(update.is_owned_by(7));
        assert!(!update.is_owned_by(8));
        assert!(!update.is_public());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": 3,
            "title": "Easter Service",
            "description": "Join us",
            "category": "announcement",
            "created_at": "2025-03-30T09:00:00Z"
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.status, UpdateStatus::Pending);
        assert_eq!(update.team, "HQ");
        assert!(update.rejection_reason.is_none());
        assert!(update.created_by.is_none());
    }
}

//! User model
//!
//! Accounts live on the backend; this layer only ever holds the copy
//! returned by the current-user endpoint or the admin user list. The
//! role flags gate every manager-level affordance in the admin area.

use serde::{Deserialize, Serialize};

/// Departments a user can belong to. Doubles as the team label on
/// updates the user creates.
pub const DEPARTMENTS: &[&str] = super::update::TEAMS;

/// User account as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
    /// Staff flag
    #[serde(default)]
    pub is_staff: bool,
    /// Superuser flag
    #[serde(default)]
    pub is_superuser: bool,
    /// Department / team label
    #[serde(default)]
    pub department: Option<String>,
}

impl User {
    /// Whether the user holds the manager role: superusers, staff, and
    /// anyone in the HQ department may moderate updates.
    pub fn is_manager(&self) -> bool {
        self.is_superuser || self.is_staff || self.department.as_deref() == Some("HQ")
    }

    /// Whether the user may see the admin-only sections (prayer wall
    /// moderation, user management). Stricter than [`is_manager`]:
    /// HQ department alone is not enough.
    ///
    /// [`is_manager`]: User::is_manager
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.is_staff
    }

    /// Display name: "First Last" when set, username otherwise.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Input for creating a user account. The password is write-only and
/// never read back from the backend.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub department: String,
}

/// Input for updating a user account (PATCH semantics; `None` fields
/// are left untouched).
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

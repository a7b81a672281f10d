//! Prayer request model
//!
//! Requests are submitted from the public wall, held unapproved until
//! an admin releases them, and collect "prayed for this" likes. The
//! viral flag is computed server-side and read-only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prayer request as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerRequest {
    /// Unique identifier
    pub id: i64,
    /// Author display name ("Anonymous" when withheld)
    pub author: String,
    /// Request category
    pub category: PrayerCategory,
    /// Free-text request
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Whether the request is visible on the public wall
    #[serde(default)]
    pub is_approved: bool,
    /// "Prayed for this" counter
    #[serde(default)]
    pub likes: u32,
    /// High-engagement indicator, derived by the backend
    #[serde(default)]
    pub is_viral: bool,
}

/// Category of a prayer request. Wire names are capitalized, matching
/// the backend's closed choice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrayerCategory {
    Healing,
    Family,
    Employment,
    #[serde(rename = "Spiritual Growth")]
    SpiritualGrowth,
    Health,
    Guidance,
    Other,
}

impl PrayerCategory {
    /// All categories, in wall-filter order.
    pub const ALL: [PrayerCategory; 7] = [
        PrayerCategory::Healing,
        PrayerCategory::Family,
        PrayerCategory::Employment,
        PrayerCategory::SpiritualGrowth,
        PrayerCategory::Health,
        PrayerCategory::Guidance,
        PrayerCategory::Other,
    ];
}

impl fmt::Display for PrayerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrayerCategory::Healing => write!(f, "Healing"),
            PrayerCategory::Family => write!(f, "Family"),
            PrayerCategory::Employment => write!(f, "Employment"),
            PrayerCategory::SpiritualGrowth => write!(f, "Spiritual Growth"),
            PrayerCategory::Health => write!(f, "Health"),
            PrayerCategory::Guidance => write!(f, "Guidance"),
            PrayerCategory::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for PrayerCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Healing" => Ok(PrayerCategory::Healing),
            "Family" => Ok(PrayerCategory::Family),
            "Employment" => Ok(PrayerCategory::Employment),
            "Spiritual Growth" => Ok(PrayerCategory::SpiritualGrowth),
            "Health" => Ok(PrayerCategory::Health),
            "Guidance" => Ok(PrayerCategory::Guidance),
            "Other" => Ok(PrayerCategory::Other),
            _ => Err(anyhow::anyhow!("Invalid prayer category: {}", s)),
        }
    }
}

/// Input for submitting a prayer request from the public wall. The
/// approval flag is implicit: new requests always start unapproved.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePrayerInput {
    pub author: String,
    pub category: PrayerCategory,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in PrayerCategory::ALL {
            let parsed = PrayerCategory::from_str(&category.to_string()).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_spiritual_growth_wire_name() {
        let json = serde_json::to_string(&PrayerCategory::SpiritualGrowth).unwrap();
        assert_eq!(json, "\"Spiritual Growth\"");
        let parsed: PrayerCategory = serde_json::from_str("\"Spiritual Growth\"").unwrap();
        assert_eq!(parsed, PrayerCategory::SpiritualGrowth);
    }

    #[test]
    fn test_new_request_defaults_to_unapproved() {
        let json = r#"{
            "id": 9,
            "author": "Sarah M.",
            "category": "Healing",
            "content": "Please pray for my mother.",
            "created_at": "2025-06-01T12:00:00Z"
        }"#;
        let request: PrayerRequest = serde_json::from_str(json).unwrap();
        assert!(!request.is_approved);
        assert_eq!(request.likes, 0);
        assert!(!request.is_viral);
    }
}

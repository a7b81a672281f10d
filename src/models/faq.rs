//! FAQ model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frequently asked question as served by the backend. Lower `order`
/// sorts first on the public page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    /// Unique identifier
    pub id: i64,
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Grouping category
    #[serde(default)]
    pub category: FaqCategory,
    /// Sort order (ascending)
    #[serde(default)]
    pub order: i32,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Category of an FAQ entry. Wire names are capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FaqCategory {
    #[default]
    General,
    Services,
    Membership,
    Beliefs,
    Other,
}

impl FaqCategory {
    /// All categories, in page-filter order.
    pub const ALL: [FaqCategory; 5] = [
        FaqCategory::General,
        FaqCategory::Services,
        FaqCategory::Membership,
        FaqCategory::Beliefs,
        FaqCategory::Other,
    ];
}

impl fmt::Display for FaqCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaqCategory::General => write!(f, "General"),
            FaqCategory::Services => write!(f, "Services"),
            FaqCategory::Membership => write!(f, "Membership"),
            FaqCategory::Beliefs => write!(f, "Beliefs"),
            FaqCategory::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for FaqCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "General" => Ok(FaqCategory::General),
            "Services" => Ok(FaqCategory::Services),
            "Membership" => Ok(FaqCategory::Membership),
            "Beliefs" => Ok(FaqCategory::Beliefs),
            "Other" => Ok(FaqCategory::Other),
            _ => Err(anyhow::anyhow!("Invalid FAQ category: {}", s)),
        }
    }
}

/// Input for creating or replacing an FAQ entry.
#[derive(Debug, Clone, Serialize)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
    pub category: FaqCategory,
    pub order: i32,
}

/// Sort FAQs for display: ascending `order`, newest first within the
/// same order value.
pub fn sort_for_display(faqs: &mut [Faq]) {
    faqs.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

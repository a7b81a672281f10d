//! National events and church locations
//!
//! Both entities come from the external planning/church-data provider,
//! not from the portal backend. Raw wire shapes are kept separate from
//! the cleaned records the views consume; normalization lives in
//! `provider`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry of the national events plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NationalEvent {
    /// Provider-assigned identifier
    pub id: i64,
    /// Event title
    pub title: String,
    /// Free-form category label, if any
    #[serde(default)]
    pub category: Option<String>,
    /// First day of the event
    #[serde(deserialize_with = "flexible_date")]
    pub start_date: NaiveDate,
    /// Last day, when the event spans several
    #[serde(default, deserialize_with = "flexible_date_opt")]
    pub end_date: Option<NaiveDate>,
    /// Venue label
    #[serde(default)]
    pub location: Option<String>,
    /// Longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the event is on the national calendar
    #[serde(default)]
    pub is_national: bool,
}

impl NationalEvent {
    /// Case-folded haystack used by the search box and the category
    /// filter chips.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.category.as_deref().unwrap_or(""),
            self.title,
            self.description.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

/// Accept both plain dates (`2025-01-05`) and datetime strings
/// (`2025-01-05T09:00:00Z`); the provider is inconsistent across
/// endpoints.
fn flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible_date(&raw).map_err(serde::de::Error::custom)
}

fn flexible_date_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => {
            parse_flexible_date(&s).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

fn parse_flexible_date(raw: &str) -> Result<NaiveDate, String> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {}", raw, e))
}

/// Kind of entry in the church locations directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    Province,
    District,
    Assembly,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationKind::Province => write!(f, "Province"),
            LocationKind::District => write!(f, "District"),
            LocationKind::Assembly => write!(f, "Assembly"),
        }
    }
}

impl FromStr for LocationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Province" => Ok(LocationKind::Province),
            "District" => Ok(LocationKind::District),
            "Assembly" => Ok(LocationKind::Assembly),
            _ => Err(anyhow::anyhow!("Invalid location kind: {}", s)),
        }
    }
}

/// A cleaned church location record. `id` is the `kind-id` composite
/// because the provider numbers each kind separately.
#[derive(Debug, Clone, Serialize)]
pub struct ChurchLocation {
    /// Composite identity, e.g. `Assembly-42`
    pub id: String,
    /// Entry kind
    pub kind: LocationKind,
    /// Display name
    pub name: String,
    /// Latitude in degrees, when the provider has coordinates
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// Street address
    pub address: Option<String>,
    /// Responsible pastor/leader
    pub leader_name: Option<String>,
    /// Leader contact phone
    pub leader_phone: Option<String>,
    /// Province the entry belongs to, title-cased
    pub province: Option<String>,
    /// Distance from the visitor in km, filled in when the page was
    /// given coordinates to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl ChurchLocation {
    /// Coordinates as a pair, when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Case-folded haystack for the search box: name, leader, address,
    /// phone, raw coordinates.
    pub fn search_text(&self) -> String {
        let coords = self
            .coordinates()
            .map(|(lat, lon)| format!("{},{}", lat, lon))
            .unwrap_or_default();
        format!(
            "{} {} {} {} {}",
            self.name,
            self.leader_name.as_deref().unwrap_or(""),
            self.address.as_deref().unwrap_or(""),
            self.leader_phone.as_deref().unwrap_or(""),
            coords
        )
        .to_lowercase()
    }
}

/// Raw location record as the provider serves it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub leader_name: Option<String>,
    #[serde(default)]
    pub leader_phone: Option<String>,
    #[serde(default)]
    pub official_government_province: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accepts_plain_date() {
        let json = r#"{"id": 1, "title": "Youth Conference", "start_date": "2025-07-10"}"#;
        let event: NationalEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.start_date, NaiveDate::from_ymd_opt(2025, 7, 10).unwrap());
        assert!(event.end_date.is_none());
    }

    #[test]
    fn test_event_accepts_datetime() {
        let json = r#"{
            "id": 2,
            "title": "Leadership Summit",
            "start_date": "2025-01-25T08:30:00Z",
            "end_date": "2025-01-26T16:00:00Z"
        }"#;
        let event: NationalEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.start_date, NaiveDate::from_ymd_opt(2025, 1, 25).unwrap());
        assert_eq!(event.end_date, Some(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap()));
    }

    #[test]
    fn test_event_rejects_garbage_date() {
        let json = r#"{"id": 3, "title": "X", "start_date": "soon"}"#;
        assert!(serde_json::from_str::<NationalEvent>(json).is_err());
    }

    #[test]
    fn test_search_text_includes_category_and_description() {
        let json = r#"{
            "id": 4,
            "title": "All Zones Deeper Life",
            "category": "Conference",
            "description": "Join us for a time of prayer",
            "start_date": "2025-05-01"
        }"#;
        let event: NationalEvent = serde_json::from_str(json).unwrap();
        let haystack = event.search_text();
        assert!(haystack.contains("conference"));
        assert!(haystack.contains("deeper life"));
        assert!(haystack.contains("prayer"));
    }

    #[test]
    fn test_location_coordinates() {
        let location = ChurchLocation {
            id: "Assembly-1".to_string(),
            kind: LocationKind::Assembly,
            name: "Maputo Central".to_string(),
            latitude: Some(-25.96),
            longitude: Some(32.58),
            address: None,
            leader_name: None,
            leader_phone: None,
            province: None,
            distance_km: None,
        };
        assert_eq!(location.coordinates(), Some((-25.96, 32.58)));
    }
}

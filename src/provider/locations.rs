//! Church locations provider
//!
//! One search endpoint returning the whole directory for an empty
//! query. Raw records arrive with placeholder values ("N/A" leaders,
//! blank addresses, snake_case province names) that are cleaned here
//! before any view sees them.

use moka::future::Cache;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::models::{ChurchLocation, LocationKind, RawLocation};

/// Provinces offered by the filter dropdown.
pub const MOZAMBIQUE_PROVINCES: &[&str] = &[
    "Cabo Delgado",
    "Gaza",
    "Inhambane",
    "Manica",
    "Maputo City",
    "Maputo Province",
    "Nampula",
    "Niassa",
    "Sofala",
    "Tete",
    "Zambézia",
];

/// Client for the church locations directory.
pub struct LocationsProvider {
    client: reqwest::Client,
    base_url: String,
    token: String,
    cache: Cache<String, Arc<Vec<ChurchLocation>>>,
}

impl LocationsProvider {
    /// Build the provider from configuration.
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .max_capacity(64)
            .build();
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            cache,
        })
    }

    /// The full cleaned directory, from cache when fresh. Fetch
    /// failures degrade to an empty list.
    pub async fn load(&self) -> Arc<Vec<ChurchLocation>> {
        self.search("").await
    }

    /// Search the directory. The empty query returns everything.
    pub async fn search(&self, query: &str) -> Arc<Vec<ChurchLocation>> {
        let key = query.to_string();
        self.cache
            .get_with(key, async { Arc::new(self.fetch(query).await) })
            .await
    }

    async fn fetch(&self, query: &str) -> Vec<ChurchLocation> {
        let url = format!(
            "{}/churchdata/public-locations/search/?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        let mut request = self.client.get(&url);
        if !self.token.is_empty() {
            request = request.header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", self.token),
            );
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Vec<RawLocation>>().await {
                    Ok(raw) => raw.into_iter().filter_map(clean_location).collect(),
                    Err(e) => {
                        tracing::warn!(error = %e, "locations payload failed to parse");
                        Vec::new()
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "locations provider rejected request");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "locations provider unreachable");
                Vec::new()
            }
        }
    }
}

/// Clean one raw record. Returns `None` for entries whose kind is
/// unknown; everything else is normalized:
/// - composite `kind-id` identity (the provider numbers each kind
///   separately)
/// - `"N/A"` leaders and blank addresses/phones become `None`
/// - province names turn from `snake_case` into Title Case
pub fn clean_location(raw: RawLocation) -> Option<ChurchLocation> {
    let kind = match LocationKind::from_str(&raw.kind) {
        Ok(kind) => kind,
        Err(_) => {
            tracing::warn!(kind = %raw.kind, id = raw.id, "skipping location of unknown kind");
            return None;
        }
    };

    Some(ChurchLocation {
        id: format!("{}-{}", kind, raw.id),
        kind,
        name: raw.name,
        latitude: raw.latitude,
        longitude: raw.longitude,
        address: raw
            .address
            .filter(|a| !a.trim().is_empty())
            .map(|a| a.trim().to_string()),
        leader_name: raw.leader_name.filter(|n| !n.trim().is_empty() && n != "N/A"),
        leader_phone: raw.leader_phone.filter(|p| !p.trim().is_empty()),
        province: raw.official_government_province.as_deref().map(format_province),
        distance_km: None,
    })
}

/// `maputo_city` → `Maputo City`
fn format_province(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Group locations by province, preserving input order inside each
/// group. Entries without a province gather under "Other".
pub fn group_by_province(locations: &[ChurchLocation]) -> Vec<(String, Vec<ChurchLocation>)> {
    let mut groups: Vec<(String, Vec<ChurchLocation>)> = Vec::new();
    for location in locations {
        let province = location
            .province
            .clone()
            .unwrap_or_else(|| "Other".to_string());
        match groups.iter_mut().find(|(name, _)| *name == province) {
            Some((_, bucket)) => bucket.push(location.clone()),
            None => groups.push((province, vec![location.clone()])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: i64, kind: &str) -> RawLocation {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": kind,
            "name": "Maputo Central",
            "latitude": -25.96,
            "longitude": 32.58,
            "address": "  Av. Principal 1  ",
            "leader_name": "Pr. Jaime",
            "leader_phone": "84 123 4567",
            "official_government_province": "maputo_city",
        }))
        .unwrap()
    }

    #[test]
    fn test_clean_location_composite_id() {
        let location = clean_location(raw(42, "Assembly")).unwrap();
        assert_eq!(location.id, "Assembly-42");
        assert_eq!(location.kind, LocationKind::Assembly);
        assert_eq!(location.address.as_deref(), Some("Av. Principal 1"));
        assert_eq!(location.province.as_deref(), Some("Maputo City"));
    }

    #[test]
    fn test_clean_location_placeholders() {
        let mut raw = raw(1, "District");
        raw.leader_name = Some("N/A".to_string());
        raw.address = Some("   ".to_string());
        raw.leader_phone = Some(String::new());

        let location = clean_location(raw).unwrap();
        assert!(location.leader_name.is_none());
        assert!(location.address.is_none());
        assert!(location.leader_phone.is_none());
    }

    #[test]
    fn test_clean_location_unknown_kind_skipped() {
        assert!(clean_location(raw(1, "Campus")).is_none());
    }

    #[test]
    fn test_format_province() {
        assert_eq!(format_province("maputo_city"), "Maputo City");
        assert_eq!(format_province("gaza"), "Gaza");
        assert_eq!(format_province("cabo_delgado"), "Cabo Delgado");
    }

    #[test]
    fn test_group_by_province() {
        let a = clean_location(raw(1, "Assembly")).unwrap();
        let mut b = clean_location(raw(2, "Assembly")).unwrap();
        b.province = Some("Gaza".to_string());
        let mut c = clean_location(raw(3, "Assembly")).unwrap();
        c.province = None;

        let groups = group_by_province(&[a, b, c]);
        let names: Vec<&str> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Maputo City", "Gaza", "Other"]);
    }
}

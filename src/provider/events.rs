//! National events provider
//!
//! The planning service exposes one page per calendar year, sometimes
//! as a flat array and sometimes wrapped in a `{results: [...]}`
//! envelope. The provider fetches the previous, current and next year
//! concurrently, normalizes both shapes, dedupes by id and caches the
//! merged plan.

use chrono::{Datelike, NaiveDate, Utc};
use moka::future::Cache;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::models::NationalEvent;

const CACHE_KEY: &str = "national-events";

/// Either wire shape of an events page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventsPage {
    Flat(Vec<NationalEvent>),
    Paginated { results: Vec<NationalEvent> },
}

impl EventsPage {
    fn into_events(self) -> Vec<NationalEvent> {
        match self {
            EventsPage::Flat(events) => events,
            EventsPage::Paginated { results } => results,
        }
    }
}

/// Client for the national events plan.
pub struct EventsProvider {
    client: reqwest::Client,
    base_url: String,
    token: String,
    cache: Cache<&'static str, Arc<Vec<NationalEvent>>>,
}

impl EventsProvider {
    /// Build the provider from configuration.
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .max_capacity(4)
            .build();
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            cache,
        })
    }

    /// The merged national plan, from cache when fresh. Years that
    /// fail to fetch are logged and skipped; the plan never errors as
    /// a whole.
    pub async fn load(&self) -> Arc<Vec<NationalEvent>> {
        self.cache
            .get_with(CACHE_KEY, async { Arc::new(self.fetch_all().await) })
            .await
    }

    async fn fetch_all(&self) -> Vec<NationalEvent> {
        let current_year = Utc::now().year();
        let years = [current_year - 1, current_year, current_year + 1];

        let pages = futures::future::join_all(years.iter().map(|&year| self.fetch_year(year))).await;

        let merged: Vec<NationalEvent> = pages.into_iter().flatten().collect();
        let mut events = dedupe_by_id(merged);
        events.sort_by_key(|e| e.start_date);
        events
    }

    async fn fetch_year(&self, year: i32) -> Vec<NationalEvent> {
        let url = format!("{}/planning/public/events/?year={}", self.base_url, year);
        let mut request = self.client.get(&url);
        if !self.token.is_empty() {
            request = request.header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", self.token),
            );
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<EventsPage>().await {
                    Ok(page) => page.into_events(),
                    Err(e) => {
                        tracing::warn!(year, error = %e, "events page failed to parse");
                        Vec::new()
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(year, status = %response.status(), "events provider rejected request");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(year, error = %e, "events provider unreachable");
                Vec::new()
            }
        }
    }
}

/// Collapse duplicate ids, first occurrence wins. Year pages overlap
/// for events spanning the new year.
pub fn dedupe_by_id(events: Vec<NationalEvent>) -> Vec<NationalEvent> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|e| seen.insert(e.id))
        .collect()
}

/// Split a plan into upcoming (soonest first) and past (most recent
/// first) relative to `today`.
pub fn partition_events(
    events: &[NationalEvent],
    today: NaiveDate,
) -> (Vec<NationalEvent>, Vec<NationalEvent>) {
    let mut upcoming: Vec<NationalEvent> = events
        .iter()
        .filter(|e| e.start_date >= today)
        .cloned()
        .collect();
    let mut past: Vec<NationalEvent> = events
        .iter()
        .filter(|e| e.start_date < today)
        .cloned()
        .collect();
    upcoming.sort_by_key(|e| e.start_date);
    past.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    (upcoming, past)
}

/// Category filter chips on the events page. Matching is keyword-based
/// over category and title, in either language, because the provider's
/// category labels are free-form.
pub fn matches_category(event: &NationalEvent, chip: &str) -> bool {
    let haystack = event.search_text();
    let any = |needles: &[&str]| needles.iter().any(|n| haystack.contains(n));

    match chip {
        "all" => true,
        "conferences" => any(&["conference", "conferência"]),
        "youth" => any(&["youth", "jovem", "jovens"]),
        "training" => any(&["training", "leadership", "treinamento", "liderança"]),
        "seminars" => any(&["seminar", "seminário"]),
        "executive" => any(&["executive", "executivo", "board", "directors", "direcção"]),
        "workshops" => any(&["workshop", "class", "aula"]),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, title: &str, start: &str) -> NationalEvent {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "start_date": start,
        }))
        .unwrap()
    }

    #[test]
    fn test_envelope_shapes_parse() {
        let flat: EventsPage = serde_json::from_str(
            r#"[{"id": 1, "title": "A", "start_date": "2025-01-01"}]"#,
        )
        .unwrap();
        assert_eq!(flat.into_events().len(), 1);

        let paginated: EventsPage = serde_json::from_str(
            r#"{"results": [{"id": 2, "title": "B", "start_date": "2025-02-01"}]}"#,
        )
        .unwrap();
        assert_eq!(paginated.into_events().len(), 1);
    }

    #[test]
    fn test_dedupe_first_wins() {
        let events = vec![
            event(1, "First copy", "2025-01-01"),
            event(2, "Other", "2025-02-01"),
            event(1, "Second copy", "2025-01-01"),
        ];
        let deduped = dedupe_by_id(events);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "First copy");
    }

    #[test]
    fn test_partition_orders_both_halves() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let events = vec![
            event(1, "Past old", "2024-01-10"),
            event(2, "Future far", "2025-12-01"),
            event(3, "Past recent", "2025-05-20"),
            event(4, "Future near", "2025-06-01"),
        ];

        let (upcoming, past) = partition_events(&events, today);

        let up: Vec<i64> = upcoming.iter().map(|e| e.id).collect();
        let pa: Vec<i64> = past.iter().map(|e| e.id).collect();
        assert_eq!(up, vec![4, 2]);
        assert_eq!(pa, vec![3, 1]);
    }

    #[test]
    fn test_category_chips() {
        let youth = event(1, "National Youth Conference", "2025-01-01");
        assert!(matches_category(&youth, "all"));
        assert!(matches_category(&youth, "youth"));
        assert!(matches_category(&youth, "conferences"));
        assert!(!matches_category(&youth, "seminars"));

        let board = event(2, "Board of Directors Meeting", "2025-01-01");
        assert!(matches_category(&board, "executive"));
        assert!(!matches_category(&board, "youth"));
    }
}

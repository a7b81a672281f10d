//! History timeline model

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One milestone on the "Our History" timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Unique identifier
    pub id: i64,
    /// Date of the milestone
    pub date: NaiveDate,
    /// Headline
    pub title: String,
    /// Narrative text
    pub description: String,
}

impl HistoryEvent {
    /// Year the timeline groups this milestone under.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Input for creating or replacing a history event.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEventInput {
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
}

/// Group events by year, newest year first, for the timeline view.
pub fn timeline(mut events: Vec<HistoryEvent>) -> Vec<(i32, Vec<HistoryEvent>)> {
    events.sort_by(|a, b| b.date.cmp(&a.date));

    let mut groups: Vec<(i32, Vec<HistoryEvent>)> = Vec::new();
    for event in events {
        let year = event.year();
        match groups.last_mut() {
            Some((group_year, bucket)) if *group_year == year => bucket.push(event),
            _ => groups.push((year, vec![event])),
        }
    }
    groups
}

//! Split timed events into upcoming, ongoing and past.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::constants::{END_FIELD, START_FIELD};
use crate::document::{self, Category};

/// Events partitioned relative to a single instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Categorized {
    pub upcoming: Vec<Value>,
    pub ongoing: Vec<Value>,
    pub past: Vec<Value>,
}

impl Categorized {
    pub fn into_document(self) -> Value {
        document::keyed([
            (Category::Upcoming, self.upcoming),
            (Category::Ongoing, self.ongoing),
            (Category::Past, self.past),
        ])
    }
}

/// Classify a single event window against `now`.
/// Ongoing is inclusive at both `start` and `end`.
pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Category {
    if now < start {
        Category::Upcoming
    } else if now <= end {
        Category::Ongoing
    } else {
        Category::Past
    }
}

/// Partition events by their `start`/`end` timestamps.
/// Events without a parseable window are left out. Input order is kept
/// within each category.
pub fn categorize(events: Vec<Value>, now: DateTime<Utc>) -> Categorized {
    let mut result = Categorized::default();

    for event in events {
        let window = event_time(&event, START_FIELD).zip(event_time(&event, END_FIELD));
        let Some((start, end)) = window else {
            tracing::debug!(
                item = document::display_name(&event).unwrap_or("-"),
                "Skipping event without a valid start/end"
            );
            continue;
        };

        match classify(start, end, now) {
            Category::Upcoming => result.upcoming.push(event),
            Category::Ongoing => result.ongoing.push(event),
            _ => result.past.push(event),
        }
    }

    result
}

fn event_time(event: &Value, field: &str) -> Option<DateTime<Utc>> {
    match event.get(field)? {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Parse a timestamp string.
/// Accepts RFC 3339, naive date-times (taken as UTC) and bare dates (UTC midnight).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

//! Composite `(timestamp, id)` cursors for time-ordered listings.
//!
//! A cursor is `"<iso timestamp>|<id>"`. Only the first `|` separates the two
//! halves, so ids may contain the delimiter. Decoding never fails loudly: any
//! malformed input is treated as "no cursor" and the listing starts over.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const CURSOR_DELIMITER: char = '|';

/// Naive layouts accepted in addition to RFC 3339 / RFC 2822. Read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeCursor {
    /// Canonical ISO-8601 timestamp (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
    pub t: String,
    pub id: String,
}

/// A page of results plus the cursor for the next request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

pub fn make_composite_cursor(timestamp_iso: &str, id: &str) -> String {
    format!("{}{}{}", timestamp_iso, CURSOR_DELIMITER, id)
}

pub fn parse_composite_cursor(raw: Option<&str>) -> Option<CompositeCursor> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let (t, id) = raw.split_once(CURSOR_DELIMITER)?;
    let t = t.trim();
    let id = id.trim();
    if t.is_empty() || id.is_empty() {
        return None;
    }

    let parsed = parse_timestamp(t)?;

    Some(CompositeCursor {
        t: to_iso_millis(&parsed),
        id: id.to_string(),
    })
}

/// Format a UTC instant the way cursors and stored timestamps expect it.
pub fn to_iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

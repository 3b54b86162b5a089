// file: src/normalize/datetime.rs
// description: publication timestamp parsing, always normalized to UTC
// reference: https://docs.rs/chrono

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

/// Parses an ISO 8601 timestamp from the JSON API source. Tolerates a
/// trailing `Z` and a missing offset, both treated as UTC. Parse
/// failures log a warning and yield None; they never abort processing.
pub fn parse_iso_datetime(date_string: &str) -> Option<DateTime<Utc>> {
    if date_string.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_string) {
        return Some(dt.with_timezone(&Utc));
    }

    // No offset (or a bare Z we strip): assume UTC
    let naive = date_string.strip_suffix('Z').unwrap_or(date_string);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    warn!("Date parse error '{}'", date_string);
    None
}

/// Parses an RFC 2822 `pubDate` from the RSS source. Feed timestamps
/// are assumed UTC regardless of the offset they advertise.
pub fn parse_rfc2822_datetime(date_string: &str) -> Option<DateTime<Utc>> {
    if date_string.is_empty() {
        return None;
    }

    match DateTime::parse_from_rfc2822(date_string) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!("pubDate parse error '{}': {}", date_string, e);
            None
        }
    }
}

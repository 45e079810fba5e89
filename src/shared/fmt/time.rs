//! Timestamp formatting for price rows.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Placeholder for missing or unrepresentable values.
pub const PLACEHOLDER: &str = "—";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format Unix milliseconds in the local time zone.
pub fn format_timestamp(millis: i64) -> String {
    format_timestamp_in(millis, &Local)
}

/// Format Unix milliseconds in an explicit time zone.
pub fn format_timestamp_in<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(ts) => ts.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

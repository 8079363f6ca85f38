use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::America::Santiago;
use serde_json::Value;

use crate::record::{is_present, text};

/// Short es-CL layout: day-month-year, 12h clock with an unpadded hour. The
/// meridiem marker is appended separately since chrono only knows `AM`/`PM`.
const CHILE_FORMAT: &str = "%d-%m-%Y, %-I:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses the date formats operator APIs are known to return. Timestamps without
/// an offset are taken as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_instant(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&Santiago);
    let (is_pm, _) = local.hour12();
    let meridiem = if is_pm { "p. m." } else { "a. m." };
    format!("{} {}", local.format(CHILE_FORMAT), meridiem)
}

/// Renders an upstream date value in Chilean local time.
///
/// Blank values become `""`. Strings and epoch-millisecond numbers that cannot be
/// read as a date are returned unchanged.
pub fn format_chile(value: Option<&Value>) -> String {
    if !is_present(value) {
        return String::new();
    }

    let instant = match value {
        Some(Value::String(s)) => parse_instant(s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };

    match instant {
        Some(instant) => format_instant(instant),
        None => text(value),
    }
}

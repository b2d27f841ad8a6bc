//! Serde adapter for match and rating dates.
//!
//! Dates are written as RFC 3339. On read, RFC 3339 and the legacy
//! `Jan 15, 2017 21:30:00 PM` layout are both accepted, the latter as UTC.
//! The legacy hour is a 24-hour field and its AM/PM marker carries no meaning.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::PersistenceError;

const LEGACY_FORMAT: &str = "%b %d, %Y %H:%M:%S";

pub fn parse(s: &str) -> Result<DateTime<FixedOffset>, PersistenceError> {
    let trimmed = s.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date);
    }

    NaiveDateTime::parse_from_str(strip_meridiem(trimmed), LEGACY_FORMAT)
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| PersistenceError::InvalidDate(s.to_owned()))
}

fn strip_meridiem(s: &str) -> &str {
    match s.rsplit_once(' ') {
        Some((rest, marker)) if marker.eq_ignore_ascii_case("AM") || marker.eq_ignore_ascii_case("PM") => rest.trim_end(),
        _ => s
    }
}

pub fn serialize<S: Serializer>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

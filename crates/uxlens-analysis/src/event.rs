//! Recorded UI events consumed by the detectors.
//!
//! Each record type mirrors the columns of one kind of event log. Records
//! deserialize with serde from any tabular source whose header names match the
//! field names; unknown columns are ignored.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One recorded UI event of a user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InteractionEvent {
    pub user_id: String,
    pub interaction_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Remaining columns of the row (e.g. `event_type`, `element_id`), by header name.
    ///
    /// Filled in by the loader rather than by serde, so every column value stays
    /// the raw string of the row.
    #[serde(skip_deserializing, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl InteractionEvent {
    /// An event without extra columns.
    #[must_use]
    pub fn new(user_id: &str, interaction_id: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            user_id: user_id.to_owned(),
            interaction_id: interaction_id.to_owned(),
            timestamp,
            extra: BTreeMap::new(),
        }
    }
}

/// One value typed into an input field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldInputEvent {
    pub field_id: String,
    pub input_value: String,
}

/// One configuration choice made by a user on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigEvent {
    pub user_id: String,
    pub screen_id: String,
    pub config_key: String,
    pub config_value: String,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid timestamp '{input}': expected RFC 3339 or 'YYYY-MM-DD[ HH:MM[:SS[.fff]]]'")]
pub struct TimestampParseError {
    pub input: String,
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses an absolute date-time.
///
/// Timestamps carrying a UTC offset are converted to UTC; timestamps without one
/// are taken as-is. A bare date is read as midnight.
///
/// # Examples
///
/// ```
/// use uxlens_analysis::event::parse_timestamp;
///
/// let a = parse_timestamp("2025-01-01 10:00:00.250").unwrap();
/// let b = parse_timestamp("2025-01-01T12:00:00.250+02:00").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TimestampParseError> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_utc());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimestampParseError {
            input: input.to_owned(),
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

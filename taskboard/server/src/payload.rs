//! Serde helpers for the JSON write payloads.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de};

/// Deserializes an explicit `null` the same way as an omitted field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an optional due date given either as `YYYY-MM-DD` or as an
/// RFC 3339 date-time. An empty string counts as no date.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            parse_date(&raw).map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Parses a calendar date, keeping only the date part of a full timestamp.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|timestamp| timestamp.date_naive()))
        .map_err(|_| format!("invalid date `{raw}`, expected YYYY-MM-DD or an RFC 3339 timestamp"))
}

use crate::error::{CashflowSimError, Result};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

pub fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        CashflowSimError::DateError(format!("{} + {} days is out of range", date, days))
    })
}

/// Adds calendar months keeping the day-of-month. When that day does not exist in the
/// target month the surplus days spill into the following month, so Jan 31 + 1 month
/// lands on Mar 3 (or Mar 2 in a leap year) rather than being clamped to Feb 28.
pub fn add_months_rolling(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    let total_months = date.month0() + months;
    let year = date.year() + (total_months / 12) as i32;
    let month = total_months % 12 + 1;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CashflowSimError::DateError(format!("{} + {} months is out of range", date, months))
    })?;

    add_days(first_of_month, u64::from(date.day0()))
}

/// Parses a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp
/// (`2025-01-01T00:00:00Z`) or a naive `YYYY-MM-DDTHH:MM:SS` timestamp.
/// Only the date as written is kept; offsets are not applied.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(timestamp.date());
    }

    Err(CashflowSimError::DateError(format!(
        "Invalid date '{}'. Expected YYYY-MM-DD or an RFC 3339 timestamp",
        input
    )))
}

/// Parses an optional date field where the empty string means "not set".
pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

pub fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_optional_date(raw.as_deref()).map_err(serde::de::Error::custom)
}

/// Treats an explicit `null` like a missing field.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

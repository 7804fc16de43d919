//! Date handling and filtering for stored calorie entries.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde_json::Value;
use std::fmt;

use crate::error::IntakeError;
use crate::models::CalorieEntry;

/// Trailing window for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Full unfiltered history
    All,
    /// Entries dated on or after `now - days`
    Days(i64),
}

impl Limit {
    /// Parses a `limit` field: `"all"`, or a whole number of days given as a
    /// JSON number or numeric string.
    pub fn from_value(value: Option<&Value>) -> Result<Self, IntakeError> {
        let days = match value {
            None | Some(Value::Null) => return Err(IntakeError::validation("Please provide limit")),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(IntakeError::validation("Please provide limit"))
            }
            Some(Value::String(s)) if s.trim() == "all" => return Ok(Limit::All),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Some(Value::Number(n)) => n.as_i64(),
            Some(_) => None,
        };

        match days {
            Some(days) if days >= 0 => Ok(Limit::Days(days)),
            _ => Err(IntakeError::validation(
                "Limit must be \"all\" or a whole number of days",
            )),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::All => write!(f, "all"),
            Limit::Days(days) => write!(f, "{}", days),
        }
    }
}

/// Parses an entry timestamp.
///
/// Accepts RFC 3339 (`2024-03-15T08:00:00Z`), a naive local timestamp
/// (`2024-03-15T08:00[:00]`), or a bare date (`2024-03-15`, local midnight).
pub fn parse_entry_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses the target calendar date of a by-date query, in local terms.
pub fn parse_target_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    parse_entry_date(raw).map(|dt| dt.with_timezone(&Local).date_naive())
}

/// Keeps entries whose calendar date in `tz` equals `target`.
pub fn filter_by_date<Tz: TimeZone>(
    entries: &[CalorieEntry],
    target: NaiveDate,
    tz: &Tz,
) -> Vec<CalorieEntry> {
    entries
        .iter()
        .filter(|entry| entry.date.with_timezone(tz).date_naive() == target)
        .cloned()
        .collect()
}

/// Applies a trailing window relative to `now`.
pub fn filter_by_limit(
    entries: &[CalorieEntry],
    limit: Limit,
    now: DateTime<Utc>,
) -> Vec<CalorieEntry> {
    let days = match limit {
        Limit::All => return entries.to_vec(),
        Limit::Days(days) => days,
    };

    let cutoff = match TimeDelta::try_days(days).and_then(|d| now.checked_sub_signed(d)) {
        Some(cutoff) => cutoff,
        None => return entries.to_vec(),
    };

    entries
        .iter()
        .filter(|entry| entry.date >= cutoff)
        .cloned()
        .collect()
}

/// Removes entries matching `item` and `date` exactly.
///
/// Returns the number of entries removed.
pub fn remove_matching(entries: &mut Vec<CalorieEntry>, item: &str, date: &DateTime<Utc>) -> usize {
    let before = entries.len();
    entries.retain(|entry| !entry.matches(item, date));
    before - entries.len()
}

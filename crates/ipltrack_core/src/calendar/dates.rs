//! Date arithmetic primitives used by calendar generation.
//!
//! # Responsibility
//! - Pure day-offset, Saturday-snap and ISO formatting/parsing helpers.
//!
//! # Invariants
//! - No helper mutates its input; all return new dates.
//! - ISO strings are the local calendar day, never UTC-shifted.

use super::CalendarError;
use chrono::{Datelike, Duration, NaiveDate};

/// Returns the date `n` days after `date` (`n` may be negative).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a strict `YYYY-MM-DD` start date.
pub fn parse_iso_date(text: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalendarError::InvalidStartDate(text.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidStartDate(text.to_string()))
}

/// Advances `date` to the next Saturday unless it already is one.
///
/// Weekday numbering follows Sunday=0 .. Saturday=6, so the snap is a
/// forward move of 0 to 6 days.
pub fn nearest_saturday_on_or_after(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    add_days(date, 6 - weekday)
}

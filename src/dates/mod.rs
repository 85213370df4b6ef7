// src/dates/mod.rs

//! Calendar-day arithmetic over ISO (`YYYY-MM-DD`) date strings.
//!
//! Everything here is plain calendar math: no time zones, no working-day
//! calendars. Empty or unparsable input yields a neutral value (an empty
//! string or `0`) instead of an error, because these helpers sit directly
//! behind free-form date fields.

pub mod clock;

use chrono::{Duration, NaiveDate};

pub use clock::{Clock, FixedClock, SystemClock};

/// Format used for every date string the engine reads or writes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO date string. Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `date + days` calendar days. `days` may be negative.
///
/// Returns an empty string for empty/invalid input or when the result falls
/// outside chrono's representable range.
pub fn add_days(date: &str, days: i64) -> String {
    let Some(parsed) = parse_date(date) else {
        return String::new();
    };
    shift(parsed, days).map(format_date).unwrap_or_default()
}

/// Signed number of days from `from` to `to` (negative if `to < from`).
pub fn days_between(from: &str, to: &str) -> i64 {
    match (parse_date(from), parse_date(to)) {
        (Some(a), Some(b)) => (b - a).num_days(),
        _ => 0,
    }
}

/// Typed counterpart of [`add_days`].
pub fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|d| date.checked_add_signed(d))
}

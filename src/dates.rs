//! Calendar date handling for the application boundary.
//!
//! All user-facing dates (product expiry, profile birth date) travel as
//! `DD.MM.YYYY` text. Unparseable or empty strings mean "unknown" and are
//! excluded from any date arithmetic rather than raised as errors.

use chrono::NaiveDate;

/// The one date format accepted at the boundary.
pub const APP_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse `DD.MM.YYYY` text into a date; `None` for anything unparseable.
pub fn parse_app_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), APP_DATE_FORMAT).ok()
}

/// Whether a string is a valid boundary date.
pub fn is_valid_app_date(s: &str) -> bool {
    parse_app_date(s).is_some()
}

/// Whole days from `today` until `date`; negative when already past.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

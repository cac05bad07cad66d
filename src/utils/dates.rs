//! Date parsing for free-form spreadsheet date cells.

use chrono::{Datelike, DateTime, NaiveDate, NaiveDateTime};

use crate::config::DateFormatConfig;

/// Parse a date string with multiple format attempts
///
/// Date-only formats are tried first, then date-time formats (the time part
/// is dropped), then RFC 3339, then heuristic detection when enabled.
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    for format in &config.datetime_formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.date_naive());
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, &detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect a format the configured lists do not cover
///
/// Only compact `YYYYMMDD` strings are recognized.
#[must_use]
pub fn detect_date_format(s: &str) -> Option<String> {
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d".to_string());
    }

    None
}

/// First day of the month `date` falls in
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day0(0).unwrap_or(date)
}

/// First day of the month following `date`'s month
#[must_use]
pub fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date).checked_add_months(chrono::Months::new(1))
}

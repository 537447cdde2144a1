// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! ISO 8601 conversion at the database boundary.
//!
//! All dates, times, and timestamps are persisted as ISO 8601 text.

use crate::error::PersistenceError;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Returns the current UTC timestamp as an RFC 3339 string.
#[must_use]
pub fn now_utc() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the stored text is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidRecord(format!("date '{value}': {e}")))
}

/// Formats a time of day as `HH:MM:SS`.
///
/// # Errors
///
/// Returns an error if the time cannot be formatted.
pub fn format_time(value: Time) -> Result<String, PersistenceError> {
    value
        .format(TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses an `HH:MM:SS` time of day.
///
/// # Errors
///
/// Returns an error if the stored text is not a valid time.
pub fn parse_time(value: &str) -> Result<Time, PersistenceError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidRecord(format!("time '{value}': {e}")))
}

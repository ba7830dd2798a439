//! SeaORM entity definitions for the persisted schema and their
//! conversions into domain records.
//!
//! Dates are stored as `YYYY-MM-DD` TEXT columns; `created_at`/`updated_at`
//! are RFC3339 timestamps.

pub mod author;
pub mod book;
pub mod book_authors;
pub mod reading;
pub mod series;
pub mod series_books;

use chrono::NaiveDate;

use crate::domain::DomainError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a stored date column. A malformed value is a storage-level
/// defect, not a caller error.
pub(crate) fn parse_stored_date(column: &str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| DomainError::Database(format!("malformed {} '{}': {}", column, value, e)))
}

pub(crate) fn parse_stored_date_opt(
    column: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, DomainError> {
    value.map(|v| parse_stored_date(column, v)).transpose()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_date_opt(date: Option<NaiveDate>) -> Option<String> {
    date.map(format_date)
}

//! Shared helpers for converting form input into domain values.
//!
//! Dates arrive as `YYYY-MM-DD` strings; an absent or empty optional date
//! means "none", an empty required date is a missing value.

use chrono::NaiveDate;

use crate::domain::DomainError;

pub fn parse_required_date(field: &'static str, value: &str) -> Result<NaiveDate, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingValue(field));
    }
    parse_date(field, value)
}

pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(field, value).map(Some),
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        DomainError::InvalidArgument(format!("{} must be a date of the form YYYY-MM-DD", field))
    })
}

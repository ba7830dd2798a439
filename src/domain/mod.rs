//! Validated domain records and business-level error types.
//!
//! Everything in here is synchronous and persistence-free; the service
//! layer maps these records to and from storage.

pub mod author;
pub mod book;
pub mod country;
pub mod errors;
pub mod isbn;
pub mod language;
pub mod reading;
pub mod series;

pub use author::Author;
pub use book::Book;
pub use country::CountryCode;
pub use errors::DomainError;
pub use language::Language;
pub use reading::Reading;
pub use series::Series;

/// Trims `value` and rejects blank input with an `InvalidArgument`. A blank
/// string is a present value violating a rule; `MissingValue` is reserved
/// for genuinely absent input at the form layer.
fn trimmed_non_blank(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "{} must not be blank",
            field
        )));
    }
    Ok(trimmed.to_owned())
}

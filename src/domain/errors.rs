//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// A required value was absent where the contract demands presence
    MissingValue(&'static str),
    /// A present value violates a business rule
    InvalidArgument(String),
    /// Resource not found
    NotFound,
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::MissingValue(field) => write!(f, "Missing value: {}", field),
            DomainError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used by the service layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

//! ISO 3166-1 alpha-2 country codes, used for author nationalities.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::DomainError;

static ALPHA2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

/// A validated two-letter country code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Parses a country code, accepting lowercase input and surrounding
    /// whitespace.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DomainError::MissingValue("nationality"));
        }
        let upper = code.to_ascii_uppercase();
        if !ALPHA2.is_match(&upper) {
            return Err(DomainError::InvalidArgument(format!(
                "'{}' is not a two-letter country code",
                code
            )));
        }
        Ok(CountryCode(upper))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

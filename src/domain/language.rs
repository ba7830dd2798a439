//! The fixed language enumeration for books.
//!
//! Which of these languages are actually offered is decided by the
//! configuration (see `Config::languages`), not by this type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A language a book can be written in, identified by its ISO 639-1 code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "de")]
    German,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::German => "de",
            Language::English => "en",
        }
    }

    /// Parses an ISO 639-1 code into a `Language`.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code.trim() {
            "" => Err(DomainError::MissingValue("language")),
            "de" => Ok(Language::German),
            "en" => Ok(Language::English),
            other => Err(DomainError::InvalidArgument(format!(
                "Unknown language code '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_codes() {
        assert_eq!(Language::parse("de").unwrap(), Language::German);
        assert_eq!(Language::parse(" en ").unwrap(), Language::English);
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert!(matches!(
            Language::parse("fr"),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            Language::parse(""),
            Err(DomainError::MissingValue("language"))
        ));
    }
}

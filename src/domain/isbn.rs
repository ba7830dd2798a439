//! Structural validation of ISBN-10 and ISBN-13 strings.
//!
//! Accepts the canonical printed forms: an optional `ISBN`, `ISBN-10` or
//! `ISBN-13` prefix, then either a compact number or one split into the
//! usual four (ISBN-10) or five (ISBN-13) hyphen- or space-separated groups.
//! The check digit position may be `X` for ISBN-10.

use once_cell::sync::Lazy;
use regex::Regex;

static PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ISBN(-1[03])?:? ").unwrap());

/// Returns true if `raw`, after trimming, matches the canonical ISBN pattern.
pub fn is_valid(raw: &str) -> bool {
    let trimmed = raw.trim();
    let body = PREFIX.replace(trimmed, "");

    let groups: Vec<&str> = body.split(['-', ' ']).collect();
    if groups.iter().any(|g| g.is_empty()) {
        return false;
    }
    let compact: String = groups.concat();

    match compact.len() {
        10 => {
            // The registration-group head is at most five digits.
            let grouping = match groups.len() {
                1 => true,
                4 => groups[0].len() <= 5,
                _ => false,
            };
            grouping
                && compact.bytes().take(9).all(|b| b.is_ascii_digit())
                && matches!(compact.as_bytes()[9], b'0'..=b'9' | b'X')
        }
        13 => {
            let grouping = match groups.len() {
                1 => true,
                5 => matches!(groups[0], "978" | "979") && groups[1].len() <= 5,
                _ => false,
            };
            grouping
                && (compact.starts_with("978") || compact.starts_with("979"))
                && compact.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_compact_forms() {
        assert!(is_valid("0345391802"));
        assert!(is_valid("044100590X"));
        assert!(is_valid("9783161484100"));
        assert!(is_valid("9791234567896"));
    }

    #[test]
    fn accepts_separated_forms() {
        assert!(is_valid("3-16-148410-X"));
        assert!(is_valid("978-3-16-148410-0"));
        assert!(is_valid("978 3 16 148410 0"));
    }

    #[test]
    fn accepts_prefixed_forms() {
        assert!(is_valid("ISBN 0345391802"));
        assert!(is_valid("ISBN-13: 978-3-16-148410-0"));
        assert!(is_valid("  ISBN-10: 3-16-148410-X  "));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_valid("ISBN"));
        assert!(!is_valid("123213"));
        assert!(!is_valid(""));
        assert!(!is_valid("978-3-16-148410"));
        assert!(!is_valid("9783161484100X"));
        assert!(!is_valid("3--16-148410-X"));
        assert!(!is_valid("12345678XX"));
        assert!(!is_valid("1234567890123"));
    }

    #[test]
    fn rejects_oversized_groups() {
        assert!(!is_valid("123456-7-8-9X"));
        assert!(!is_valid("9-783-16-148410-0"));
        assert!(!is_valid("978-316148-4-10-0"));
    }
}

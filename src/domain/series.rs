//! The `Series` entity.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{DomainError, trimmed_non_blank};

/// A series of books. The book set holds weak references only: adding or
/// removing books never touches the books themselves, and an empty series
/// is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Series {
    id: i32,
    title: String,
    books: BTreeSet<i32>,
}

impl Series {
    /// Creates a new, not yet persisted series with an optional initial
    /// book set.
    pub fn new(title: &str, books: BTreeSet<i32>) -> Result<Self, DomainError> {
        Self::restore(0, title, books)
    }

    pub(crate) fn restore(id: i32, title: &str, books: BTreeSet<i32>) -> Result<Self, DomainError> {
        Ok(Series {
            id,
            title: trimmed_non_blank("title", title)?,
            books,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Ids of the books in this series.
    pub fn books(&self) -> &BTreeSet<i32> {
        &self.books
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DomainError> {
        self.title = trimmed_non_blank("title", title)?;
        Ok(())
    }

    /// Adds all given books to the series. Returns true if the set changed,
    /// false if every book was already present.
    pub fn add_all(&mut self, books: impl IntoIterator<Item = i32>) -> bool {
        let mut changed = false;
        for book in books {
            changed |= self.books.insert(book);
        }
        changed
    }

    /// Removes the given book. Returns true if it was present.
    pub fn remove(&mut self, book: i32) -> bool {
        self.books.remove(&book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_title() {
        let series = Series::new("  The Wheel of Time ", BTreeSet::new()).unwrap();
        assert_eq!(series.title(), "The Wheel of Time");
        assert!(series.books().is_empty());
    }

    #[test]
    fn blank_title_rejected() {
        assert!(Series::new("   ", BTreeSet::new()).is_err());
        let mut series = Series::new("Earthsea", BTreeSet::new()).unwrap();
        assert!(series.set_title("").is_err());
        assert_eq!(series.title(), "Earthsea");
    }

    #[test]
    fn add_all_reports_change() {
        let mut series = Series::new("Earthsea", BTreeSet::from([1])).unwrap();
        assert!(series.add_all([1, 2]));
        assert!(!series.add_all([1, 2]));
        assert_eq!(series.books(), &BTreeSet::from([1, 2]));
    }

    #[test]
    fn remove_to_empty_is_allowed() {
        let mut series = Series::new("Earthsea", BTreeSet::from([1])).unwrap();
        assert!(series.remove(1));
        assert!(!series.remove(1));
        assert!(series.books().is_empty());
    }
}

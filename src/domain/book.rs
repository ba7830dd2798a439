//! The `Book` entity.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::{DomainError, Language, isbn, trimmed_non_blank};

/// A catalogued book. The author set is never empty: a book without authors
/// cannot exist, which is why deleting an author cascades to solely-authored
/// books at the management layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Book {
    id: i32,
    title: String,
    authors: BTreeSet<i32>,
    published: NaiveDate,
    isbn: String,
    pages: i32,
    language: Language,
}

impl Book {
    /// Creates a new, not yet persisted book.
    pub fn new(
        title: &str,
        authors: BTreeSet<i32>,
        published: NaiveDate,
        isbn: &str,
        pages: i32,
        language: Language,
    ) -> Result<Self, DomainError> {
        Self::restore(0, title, authors, published, isbn, pages, language)
    }

    /// Rebuilds a book with a known id, re-running all field validation.
    pub(crate) fn restore(
        id: i32,
        title: &str,
        authors: BTreeSet<i32>,
        published: NaiveDate,
        isbn: &str,
        pages: i32,
        language: Language,
    ) -> Result<Self, DomainError> {
        let mut book = Book {
            id,
            title: trimmed_non_blank("title", title)?,
            authors: BTreeSet::new(),
            published,
            isbn: String::new(),
            pages: 0,
            language,
        };
        book.set_authors(authors)?;
        book.set_isbn(isbn)?;
        book.set_pages(pages)?;
        Ok(book)
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Ids of the authors of this book. Never empty.
    pub fn authors(&self) -> &BTreeSet<i32> {
        &self.authors
    }

    pub fn published(&self) -> NaiveDate {
        self.published
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn pages(&self) -> i32 {
        self.pages
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DomainError> {
        self.title = trimmed_non_blank("title", title)?;
        Ok(())
    }

    /// Replaces the author set. Rejects an empty set, so no successful call
    /// can leave the book author-less.
    pub fn set_authors(&mut self, authors: BTreeSet<i32>) -> Result<(), DomainError> {
        if authors.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Set of authors must not be empty".into(),
            ));
        }
        self.authors = authors;
        Ok(())
    }

    pub fn set_published(&mut self, published: NaiveDate) {
        self.published = published;
    }

    pub fn set_isbn(&mut self, isbn: &str) -> Result<(), DomainError> {
        let isbn = isbn.trim();
        if isbn.is_empty() {
            return Err(DomainError::InvalidArgument(
                "ISBN must not be blank".into(),
            ));
        }
        if !isbn::is_valid(isbn) {
            return Err(DomainError::InvalidArgument(format!(
                "'{}' is not a valid ISBN",
                isbn
            )));
        }
        self.isbn = isbn.to_owned();
        Ok(())
    }

    pub fn set_pages(&mut self, pages: i32) -> Result<(), DomainError> {
        if pages <= 0 {
            return Err(DomainError::InvalidArgument(
                "Number of pages must be positive".into(),
            ));
        }
        self.pages = pages;
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}

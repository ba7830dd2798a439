//! The `Reading` entity.

use chrono::NaiveDate;
use serde::Serialize;

use super::DomainError;

/// One reading of a book. A reading without an end date is in progress;
/// clearing the end date again is permitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reading {
    id: i32,
    book_id: i32,
    beginning: NaiveDate,
    end: Option<NaiveDate>,
    pages_per_hour: i32,
}

impl Reading {
    /// Creates a new, not yet persisted reading. The book reference is
    /// immutable afterwards.
    pub fn new(
        book_id: i32,
        beginning: NaiveDate,
        end: Option<NaiveDate>,
        pages_per_hour: i32,
    ) -> Result<Self, DomainError> {
        Self::restore(0, book_id, beginning, end, pages_per_hour)
    }

    pub(crate) fn restore(
        id: i32,
        book_id: i32,
        beginning: NaiveDate,
        end: Option<NaiveDate>,
        pages_per_hour: i32,
    ) -> Result<Self, DomainError> {
        check_period(beginning, end)?;
        let mut reading = Reading {
            id,
            book_id,
            beginning,
            end,
            pages_per_hour: 0,
        };
        reading.set_pages_per_hour(pages_per_hour)?;
        Ok(reading)
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn book_id(&self) -> i32 {
        self.book_id
    }

    pub fn beginning(&self) -> NaiveDate {
        self.beginning
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn pages_per_hour(&self) -> i32 {
        self.pages_per_hour
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    pub fn set_beginning(&mut self, beginning: NaiveDate) -> Result<(), DomainError> {
        check_period(beginning, self.end)?;
        self.beginning = beginning;
        Ok(())
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) -> Result<(), DomainError> {
        check_period(self.beginning, end)?;
        self.end = end;
        Ok(())
    }

    pub fn set_pages_per_hour(&mut self, pages_per_hour: i32) -> Result<(), DomainError> {
        if pages_per_hour <= 0 {
            return Err(DomainError::InvalidArgument(
                "Pages per hour must be positive".into(),
            ));
        }
        self.pages_per_hour = pages_per_hour;
        Ok(())
    }
}

fn check_period(beginning: NaiveDate, end: Option<NaiveDate>) -> Result<(), DomainError> {
    if let Some(end) = end
        && end < beginning
    {
        return Err(DomainError::InvalidArgument(
            "End must not be before beginning".into(),
        ));
    }
    Ok(())
}

//! The `Author` entity.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::{CountryCode, DomainError, trimmed_non_blank};

/// A person writing books. All fields are validated on construction and on
/// every setter call; an invalid value never replaces a valid one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Author {
    id: i32,
    first_name: String,
    last_name: String,
    birth_date: Option<NaiveDate>,
    death_date: Option<NaiveDate>,
    nationality: CountryCode,
}

impl Author {
    /// Creates a new, not yet persisted author.
    pub fn new(
        first_name: &str,
        last_name: &str,
        birth_date: Option<NaiveDate>,
        death_date: Option<NaiveDate>,
        nationality: CountryCode,
    ) -> Result<Self, DomainError> {
        Self::restore(0, first_name, last_name, birth_date, death_date, nationality)
    }

    /// Rebuilds an author with a known id, re-running all field validation.
    pub(crate) fn restore(
        id: i32,
        first_name: &str,
        last_name: &str,
        birth_date: Option<NaiveDate>,
        death_date: Option<NaiveDate>,
        nationality: CountryCode,
    ) -> Result<Self, DomainError> {
        check_life_dates(birth_date, death_date)?;
        Ok(Author {
            id,
            first_name: trimmed_non_blank("first name", first_name)?,
            last_name: trimmed_non_blank("last name", last_name)?,
            birth_date,
            death_date,
            nationality,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn death_date(&self) -> Option<NaiveDate> {
        self.death_date
    }

    pub fn nationality(&self) -> &CountryCode {
        &self.nationality
    }

    pub fn set_first_name(&mut self, first_name: &str) -> Result<(), DomainError> {
        self.first_name = trimmed_non_blank("first name", first_name)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: &str) -> Result<(), DomainError> {
        self.last_name = trimmed_non_blank("last name", last_name)?;
        Ok(())
    }

    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) -> Result<(), DomainError> {
        check_life_dates(birth_date, self.death_date)?;
        self.birth_date = birth_date;
        Ok(())
    }

    pub fn set_death_date(&mut self, death_date: Option<NaiveDate>) -> Result<(), DomainError> {
        check_life_dates(self.birth_date, death_date)?;
        self.death_date = death_date;
        Ok(())
    }

    pub fn set_nationality(&mut self, nationality: CountryCode) {
        self.nationality = nationality;
    }
}

fn check_life_dates(
    birth_date: Option<NaiveDate>,
    death_date: Option<NaiveDate>,
) -> Result<(), DomainError> {
    let today = Local::now().date_naive();
    if let Some(birth) = birth_date
        && birth > today
    {
        return Err(DomainError::InvalidArgument(
            "Birth date must not be in the future".into(),
        ));
    }
    if let Some(death) = death_date
        && death > today
    {
        return Err(DomainError::InvalidArgument(
            "Death date must not be in the future".into(),
        ));
    }
    if let (Some(birth), Some(death)) = (birth_date, death_date)
        && birth > death
    {
        return Err(DomainError::InvalidArgument(
            "Birth date must not be after death date".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn tolkien() -> Author {
        Author::new(
            "John",
            "Tolkien",
            Some(date("1892-01-03")),
            Some(date("1973-09-02")),
            CountryCode::parse("GB").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn new_trims_names() {
        let author = Author::new(
            "  Jordan ",
            " Robert ",
            None,
            None,
            CountryCode::parse("US").unwrap(),
        )
        .unwrap();
        assert_eq!(author.first_name(), "Jordan");
        assert_eq!(author.last_name(), "Robert");
        assert_eq!(author.birth_date(), None);
    }

    #[test]
    fn blank_names_rejected_and_state_unchanged() {
        let mut author = tolkien();
        for bad in ["", "   ", "\t"] {
            assert!(matches!(
                author.set_first_name(bad),
                Err(DomainError::InvalidArgument(_))
            ));
            assert!(matches!(
                author.set_last_name(bad),
                Err(DomainError::InvalidArgument(_))
            ));
        }
        assert_eq!(author.first_name(), "John");
        assert_eq!(author.last_name(), "Tolkien");
    }

    #[test]
    fn birth_after_death_rejected() {
        let result = Author::new(
            "John",
            "Tolkien",
            Some(date("1973-09-02")),
            Some(date("1892-01-03")),
            CountryCode::parse("GB").unwrap(),
        );
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));

        let mut author = tolkien();
        assert!(author.set_birth_date(Some(date("1980-01-01"))).is_err());
        assert_eq!(author.birth_date(), Some(date("1892-01-03")));
    }

    #[test]
    fn future_dates_rejected() {
        let future = Local::now().date_naive() + chrono::Duration::days(7);
        let mut author = tolkien();
        assert!(author.set_death_date(Some(future)).is_err());
        assert_eq!(author.death_date(), Some(date("1973-09-02")));
    }
}

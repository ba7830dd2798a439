//! Author management - pure business logic without HTTP layer
//!
//! Deleting an author cascades to every book this author wrote alone;
//! co-authored books survive with a smaller author set.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};

use crate::domain::{Author, CountryCode, DomainError};
use crate::models::author::{ActiveModel as AuthorActiveModel, Entity as AuthorEntity};
use crate::models::{author, book_authors, format_date_opt};

use super::book_service;

/// Creates and persists a new author.
pub async fn create_author(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    birth_date: Option<NaiveDate>,
    death_date: Option<NaiveDate>,
    nationality: CountryCode,
) -> Result<Author, DomainError> {
    let author = Author::new(first_name, last_name, birth_date, death_date, nationality)?;
    let now = chrono::Utc::now().to_rfc3339();

    let model = AuthorActiveModel {
        first_name: Set(author.first_name().to_owned()),
        last_name: Set(author.last_name().to_owned()),
        birth_date: Set(format_date_opt(author.birth_date())),
        death_date: Set(format_date_opt(author.death_date())),
        nationality: Set(author.nationality().as_str().to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("Created author {} '{} {}'", model.id, model.first_name, model.last_name);
    model.try_into()
}

/// Updates an existing author. All setters must succeed before anything is
/// written back, so a mid-update violation never reaches storage.
pub async fn update_author(
    db: &DatabaseConnection,
    id: i32,
    first_name: &str,
    last_name: &str,
    birth_date: Option<NaiveDate>,
    death_date: Option<NaiveDate>,
    nationality: CountryCode,
) -> Result<Author, DomainError> {
    let model = AuthorEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let mut loaded: Author = model.clone().try_into()?;
    loaded.set_first_name(first_name)?;
    loaded.set_last_name(last_name)?;
    // The cross-field check must see the new pair of dates, never a mix
    // of old and new.
    loaded.set_death_date(None)?;
    loaded.set_birth_date(birth_date)?;
    loaded.set_death_date(death_date)?;
    loaded.set_nationality(nationality);

    let mut active: AuthorActiveModel = model.into();
    active.first_name = Set(loaded.first_name().to_owned());
    active.last_name = Set(loaded.last_name().to_owned());
    active.birth_date = Set(format_date_opt(loaded.birth_date()));
    active.death_date = Set(format_date_opt(loaded.death_date()));
    active.nationality = Set(loaded.nationality().as_str().to_owned());
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    active.update(db).await?.try_into()
}

/// Deletes an author. Books written solely by this author are deleted with
/// the full book cascade; the whole operation is one transaction.
pub async fn delete_author(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    if AuthorEntity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(DomainError::NotFound);
    }

    let links = book_authors::Entity::find()
        .filter(book_authors::Column::AuthorId.eq(id))
        .all(&txn)
        .await?;

    for link in &links {
        let coauthors = book_authors::Entity::find()
            .filter(book_authors::Column::BookId.eq(link.book_id))
            .count(&txn)
            .await?;
        if coauthors == 1 {
            tracing::debug!("Cascading delete of solely-authored book {}", link.book_id);
            book_service::delete_book_in(&txn, link.book_id).await?;
        }
    }

    // Shrink the author set of surviving co-authored books.
    book_authors::Entity::delete_many()
        .filter(book_authors::Column::AuthorId.eq(id))
        .exec(&txn)
        .await?;

    AuthorEntity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!("Deleted author {}", id);
    Ok(())
}

/// Returns all authors.
pub async fn list_authors(db: &DatabaseConnection) -> Result<Vec<Author>, DomainError> {
    AuthorEntity::find()
        .all(db)
        .await?
        .into_iter()
        .map(Author::try_from)
        .collect()
}

/// Returns the author with the given id.
pub async fn get_author(db: &DatabaseConnection, id: i32) -> Result<Author, DomainError> {
    AuthorEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?
        .try_into()
}

/// Counts all authors.
pub async fn count_authors(db: &DatabaseConnection) -> Result<u64, DomainError> {
    Ok(AuthorEntity::find().count(db).await?)
}

pub(crate) async fn authors_exist<C: sea_orm::ConnectionTrait>(
    conn: &C,
    ids: &std::collections::BTreeSet<i32>,
) -> Result<bool, DomainError> {
    let found = AuthorEntity::find()
        .filter(author::Column::Id.is_in(ids.iter().copied()))
        .count(conn)
        .await?;
    Ok(found == ids.len() as u64)
}

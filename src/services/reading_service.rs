//! Reading management - pure business logic without HTTP layer

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, Reading};
use crate::models::reading::{ActiveModel as ReadingActiveModel, Entity as ReadingEntity};
use crate::models::{book, format_date, format_date_opt, reading};

/// Creates and persists a new reading of an existing book.
pub async fn create_reading(
    db: &DatabaseConnection,
    book_id: i32,
    beginning: NaiveDate,
    end: Option<NaiveDate>,
    pages_per_hour: i32,
) -> Result<Reading, DomainError> {
    if book::Entity::find_by_id(book_id).one(db).await?.is_none() {
        return Err(DomainError::NotFound);
    }
    let new = Reading::new(book_id, beginning, end, pages_per_hour)?;

    let now = chrono::Utc::now().to_rfc3339();
    let model = ReadingActiveModel {
        book_id: Set(new.book_id()),
        beginning: Set(format_date(new.beginning())),
        end_date: Set(format_date_opt(new.end())),
        pages_per_hour: Set(new.pages_per_hour()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("Created reading {} of book {}", model.id, model.book_id);
    model.try_into()
}

/// Updates a reading's period and pace. The book reference is immutable
/// after creation.
pub async fn update_reading(
    db: &DatabaseConnection,
    id: i32,
    beginning: NaiveDate,
    end: Option<NaiveDate>,
    pages_per_hour: i32,
) -> Result<Reading, DomainError> {
    let model = ReadingEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let mut loaded: Reading = model.clone().try_into()?;
    // The period check must see the new pair of dates, never a mix of old
    // and new.
    loaded.set_end(None)?;
    loaded.set_beginning(beginning)?;
    loaded.set_end(end)?;
    loaded.set_pages_per_hour(pages_per_hour)?;

    let mut active: ReadingActiveModel = model.into();
    active.beginning = Set(format_date(loaded.beginning()));
    active.end_date = Set(format_date_opt(loaded.end()));
    active.pages_per_hour = Set(loaded.pages_per_hour());
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    active.update(db).await?.try_into()
}

/// Deletes a single reading.
pub async fn delete_reading(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let result = ReadingEntity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(DomainError::NotFound);
    }
    tracing::info!("Deleted reading {}", id);
    Ok(())
}

/// Deletes every reading of the given book. Used by the book delete
/// cascade and harmless for books without readings.
pub async fn delete_readings_by_book(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<u64, DomainError> {
    let result = ReadingEntity::delete_many()
        .filter(reading::Column::BookId.eq(book_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Returns all readings, most recently begun first.
pub async fn list_readings(db: &DatabaseConnection) -> Result<Vec<Reading>, DomainError> {
    ReadingEntity::find()
        .order_by_desc(reading::Column::Beginning)
        .all(db)
        .await?
        .into_iter()
        .map(Reading::try_from)
        .collect()
}

/// Returns the reading with the given id.
pub async fn get_reading(db: &DatabaseConnection, id: i32) -> Result<Reading, DomainError> {
    ReadingEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?
        .try_into()
}

/// Returns all readings of the given book, most recently begun first.
pub async fn find_readings_by_book(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<Vec<Reading>, DomainError> {
    if book::Entity::find_by_id(book_id).one(db).await?.is_none() {
        return Err(DomainError::NotFound);
    }
    ReadingEntity::find()
        .filter(reading::Column::BookId.eq(book_id))
        .order_by_desc(reading::Column::Beginning)
        .all(db)
        .await?
        .into_iter()
        .map(Reading::try_from)
        .collect()
}

/// Counts all readings.
pub async fn count_readings(db: &DatabaseConnection) -> Result<u64, DomainError> {
    Ok(ReadingEntity::find().count(db).await?)
}

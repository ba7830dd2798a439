//! Book and series management - pure business logic without HTTP layer
//!
//! Deleting a book removes it from every series that references it and
//! deletes all of its readings; deleting a series touches nothing else.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;

use crate::domain::{Author, Book, DomainError, Language, Series};
use crate::models::book::{ActiveModel as BookActiveModel, Entity as BookEntity};
use crate::models::series::{ActiveModel as SeriesActiveModel, Entity as SeriesEntity};
use crate::models::{author, book, book_authors, format_date, reading, series_books};

use super::author_service;

/// A series with its derived, read-only views: books ordered by publication
/// date and authors ordered by how many books they contributed.
#[derive(Debug, Serialize)]
pub struct SeriesDetail {
    pub id: i32,
    pub title: String,
    pub books: Vec<Book>,
    pub authors: Vec<Author>,
}

/// Creates and persists a new book. The author ids must reference existing
/// authors; this layer never creates authors on the fly.
pub async fn create_book(
    db: &DatabaseConnection,
    title: &str,
    authors: BTreeSet<i32>,
    published: NaiveDate,
    isbn: &str,
    pages: i32,
    language: Language,
) -> Result<Book, DomainError> {
    let new = Book::new(title, authors, published, isbn, pages, language)?;

    let txn = db.begin().await?;
    if !author_service::authors_exist(&txn, new.authors()).await? {
        return Err(DomainError::NotFound);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let model = BookActiveModel {
        title: Set(new.title().to_owned()),
        published: Set(format_date(new.published())),
        isbn: Set(new.isbn().to_owned()),
        pages: Set(new.pages()),
        language: Set(new.language().code().to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    link_authors(&txn, model.id, new.authors()).await?;
    txn.commit().await?;

    tracing::info!("Created book {} '{}'", model.id, model.title);
    model.into_domain(new.authors().clone())
}

/// Updates an existing book through its setters; nothing is written back
/// until every field change has been accepted.
pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    title: &str,
    authors: BTreeSet<i32>,
    published: NaiveDate,
    isbn: &str,
    pages: i32,
    language: Language,
) -> Result<Book, DomainError> {
    let txn = db.begin().await?;

    let model = BookEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound)?;
    let stored_authors = author_ids_of_book(&txn, id).await?;

    let mut loaded = model.clone().into_domain(stored_authors)?;
    loaded.set_title(title)?;
    loaded.set_authors(authors)?;
    loaded.set_published(published);
    loaded.set_isbn(isbn)?;
    loaded.set_pages(pages)?;
    loaded.set_language(language);

    if !author_service::authors_exist(&txn, loaded.authors()).await? {
        return Err(DomainError::NotFound);
    }

    book_authors::Entity::delete_many()
        .filter(book_authors::Column::BookId.eq(id))
        .exec(&txn)
        .await?;
    link_authors(&txn, id, loaded.authors()).await?;

    let mut active: BookActiveModel = model.into();
    active.title = Set(loaded.title().to_owned());
    active.published = Set(format_date(loaded.published()));
    active.isbn = Set(loaded.isbn().to_owned());
    active.pages = Set(loaded.pages());
    active.language = Set(loaded.language().code().to_owned());
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(loaded)
}

/// Deletes a book, removing it from every series that contains it and
/// deleting all of its readings, in one transaction.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    if BookEntity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(DomainError::NotFound);
    }
    delete_book_in(&txn, id).await?;

    txn.commit().await?;
    tracing::info!("Deleted book {}", id);
    Ok(())
}

/// The book delete cascade, reusable inside a caller-owned transaction
/// (the author cascade runs it per solely-authored book).
pub(crate) async fn delete_book_in<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
) -> Result<(), DomainError> {
    series_books::Entity::delete_many()
        .filter(series_books::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;
    reading::Entity::delete_many()
        .filter(reading::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;
    book_authors::Entity::delete_many()
        .filter(book_authors::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;
    BookEntity::delete_by_id(book_id).exec(conn).await?;
    Ok(())
}

/// Returns all books.
pub async fn list_books(db: &DatabaseConnection) -> Result<Vec<Book>, DomainError> {
    let models = BookEntity::find().all(db).await?;
    let mut author_map = author_map(db, models.iter().map(|m| m.id)).await?;

    models
        .into_iter()
        .map(|m| {
            let authors = author_map.remove(&m.id).unwrap_or_default();
            m.into_domain(authors)
        })
        .collect()
}

/// Returns the book with the given id.
pub async fn get_book(db: &DatabaseConnection, id: i32) -> Result<Book, DomainError> {
    let model = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;
    let authors = author_ids_of_book(db, id).await?;
    model.into_domain(authors)
}

/// Returns all books written (or co-written) by the given author.
pub async fn find_books_by_author(
    db: &DatabaseConnection,
    author_id: i32,
) -> Result<Vec<Book>, DomainError> {
    if author::Entity::find_by_id(author_id).one(db).await?.is_none() {
        return Err(DomainError::NotFound);
    }

    let book_ids: Vec<i32> = book_authors::Entity::find()
        .filter(book_authors::Column::AuthorId.eq(author_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.book_id)
        .collect();

    let models = BookEntity::find()
        .filter(book::Column::Id.is_in(book_ids))
        .all(db)
        .await?;
    let mut author_map = author_map(db, models.iter().map(|m| m.id)).await?;

    models
        .into_iter()
        .map(|m| {
            let authors = author_map.remove(&m.id).unwrap_or_default();
            m.into_domain(authors)
        })
        .collect()
}

/// Counts all books.
pub async fn count_books(db: &DatabaseConnection) -> Result<u64, DomainError> {
    Ok(BookEntity::find().count(db).await?)
}

/// Creates and persists a new series with an optional initial book set.
pub async fn create_series(
    db: &DatabaseConnection,
    title: &str,
    books: BTreeSet<i32>,
) -> Result<Series, DomainError> {
    let new = Series::new(title, books)?;

    let txn = db.begin().await?;
    if !books_exist(&txn, new.books()).await? {
        return Err(DomainError::NotFound);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let model = SeriesActiveModel {
        title: Set(new.title().to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    link_books(&txn, model.id, new.books()).await?;
    txn.commit().await?;

    tracing::info!("Created series {} '{}'", model.id, model.title);
    model.into_domain(new.books().clone())
}

/// Updates a series title and, when a book set is given, replaces its
/// membership.
pub async fn update_series(
    db: &DatabaseConnection,
    id: i32,
    title: &str,
    books: Option<BTreeSet<i32>>,
) -> Result<Series, DomainError> {
    let txn = db.begin().await?;

    let model = SeriesEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound)?;
    let stored_books = book_ids_of_series(&txn, id).await?;

    let mut loaded = model.clone().into_domain(stored_books)?;
    loaded.set_title(title)?;

    if let Some(books) = books {
        if !books_exist(&txn, &books).await? {
            return Err(DomainError::NotFound);
        }
        series_books::Entity::delete_many()
            .filter(series_books::Column::SeriesId.eq(id))
            .exec(&txn)
            .await?;
        link_books(&txn, id, &books).await?;
        loaded = model.clone().into_domain(books)?;
        loaded.set_title(title)?;
    }

    let mut active: SeriesActiveModel = model.into();
    active.title = Set(loaded.title().to_owned());
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(loaded)
}

/// Deletes a series. Member books and their readings are not affected.
pub async fn delete_series(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    if SeriesEntity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(DomainError::NotFound);
    }
    series_books::Entity::delete_many()
        .filter(series_books::Column::SeriesId.eq(id))
        .exec(&txn)
        .await?;
    SeriesEntity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!("Deleted series {}", id);
    Ok(())
}

/// Adds books to an existing series. Idempotent: books already in the
/// series are skipped, and the returned flag tells whether the membership
/// changed at all.
pub async fn add_books_to_series(
    db: &DatabaseConnection,
    books: BTreeSet<i32>,
    series_id: i32,
) -> Result<(Series, bool), DomainError> {
    let txn = db.begin().await?;

    let model = SeriesEntity::find_by_id(series_id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound)?;
    if !books_exist(&txn, &books).await? {
        return Err(DomainError::NotFound);
    }

    let stored_books = book_ids_of_series(&txn, series_id).await?;
    let added: BTreeSet<i32> = books.difference(&stored_books).copied().collect();

    let mut loaded = model.into_domain(stored_books)?;
    let changed = loaded.add_all(added.iter().copied());
    link_books(&txn, series_id, &added).await?;

    txn.commit().await?;
    Ok((loaded, changed))
}

/// Removes a book from every series referencing it; the series themselves
/// survive.
pub async fn remove_book_from_all_series(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<(), DomainError> {
    series_books::Entity::delete_many()
        .filter(series_books::Column::BookId.eq(book_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Returns all series.
pub async fn list_series(db: &DatabaseConnection) -> Result<Vec<Series>, DomainError> {
    let models = SeriesEntity::find().all(db).await?;
    let links = series_books::Entity::find().all(db).await?;

    let mut book_map: HashMap<i32, BTreeSet<i32>> = HashMap::new();
    for link in links {
        book_map.entry(link.series_id).or_default().insert(link.book_id);
    }

    models
        .into_iter()
        .map(|m| {
            let books = book_map.remove(&m.id).unwrap_or_default();
            m.into_domain(books)
        })
        .collect()
}

/// Returns the series with the given id.
pub async fn get_series(db: &DatabaseConnection, id: i32) -> Result<Series, DomainError> {
    let model = SeriesEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;
    let books = book_ids_of_series(db, id).await?;
    model.into_domain(books)
}

/// Returns the series with its computed views: member books ordered by
/// publication date and their authors ordered by descending contribution
/// count. Both are derived on read, never stored.
pub async fn get_series_detail(
    db: &DatabaseConnection,
    id: i32,
) -> Result<SeriesDetail, DomainError> {
    let series = get_series(db, id).await?;

    let models = BookEntity::find()
        .filter(book::Column::Id.is_in(series.books().iter().copied()))
        .all(db)
        .await?;
    let mut author_map = author_map(db, models.iter().map(|m| m.id)).await?;

    let mut books = models
        .into_iter()
        .map(|m| {
            let authors = author_map.remove(&m.id).unwrap_or_default();
            m.into_domain(authors)
        })
        .collect::<Result<Vec<Book>, _>>()?;
    books.sort_by_key(|b| (b.published(), b.id()));

    let mut contributions: HashMap<i32, usize> = HashMap::new();
    for book in &books {
        for author_id in book.authors() {
            *contributions.entry(*author_id).or_insert(0) += 1;
        }
    }

    let mut authors = author::Entity::find()
        .filter(author::Column::Id.is_in(contributions.keys().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(Author::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    authors.sort_by_key(|a| (std::cmp::Reverse(contributions[&a.id()]), a.id()));

    Ok(SeriesDetail {
        id: series.id(),
        title: series.title().to_owned(),
        books,
        authors,
    })
}

/// Returns all series containing the given book.
pub async fn find_series_by_book(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<Vec<Series>, DomainError> {
    if BookEntity::find_by_id(book_id).one(db).await?.is_none() {
        return Err(DomainError::NotFound);
    }

    let series_ids: Vec<i32> = series_books::Entity::find()
        .filter(series_books::Column::BookId.eq(book_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.series_id)
        .collect();

    let models = SeriesEntity::find()
        .filter(crate::models::series::Column::Id.is_in(series_ids))
        .all(db)
        .await?;

    let mut result = Vec::with_capacity(models.len());
    for model in models {
        let books = book_ids_of_series(db, model.id).await?;
        result.push(model.into_domain(books)?);
    }
    Ok(result)
}

/// Counts all series.
pub async fn count_series(db: &DatabaseConnection) -> Result<u64, DomainError> {
    Ok(SeriesEntity::find().count(db).await?)
}

async fn link_authors<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    authors: &BTreeSet<i32>,
) -> Result<(), DomainError> {
    for author_id in authors {
        book_authors::Entity::insert(book_authors::ActiveModel {
            book_id: Set(book_id),
            author_id: Set(*author_id),
        })
        .exec(conn)
        .await?;
    }
    Ok(())
}

async fn link_books<C: ConnectionTrait>(
    conn: &C,
    series_id: i32,
    books: &BTreeSet<i32>,
) -> Result<(), DomainError> {
    for book_id in books {
        series_books::Entity::insert(series_books::ActiveModel {
            series_id: Set(series_id),
            book_id: Set(*book_id),
        })
        .exec(conn)
        .await?;
    }
    Ok(())
}

pub(crate) async fn author_ids_of_book<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
) -> Result<BTreeSet<i32>, DomainError> {
    Ok(book_authors::Entity::find()
        .filter(book_authors::Column::BookId.eq(book_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.author_id)
        .collect())
}

async fn book_ids_of_series<C: ConnectionTrait>(
    conn: &C,
    series_id: i32,
) -> Result<BTreeSet<i32>, DomainError> {
    Ok(series_books::Entity::find()
        .filter(series_books::Column::SeriesId.eq(series_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.book_id)
        .collect())
}

async fn books_exist<C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i32>,
) -> Result<bool, DomainError> {
    let found = BookEntity::find()
        .filter(book::Column::Id.is_in(ids.iter().copied()))
        .count(conn)
        .await?;
    Ok(found == ids.len() as u64)
}

async fn author_map<C: ConnectionTrait>(
    conn: &C,
    book_ids: impl Iterator<Item = i32>,
) -> Result<HashMap<i32, BTreeSet<i32>>, DomainError> {
    let ids: Vec<i32> = book_ids.collect();
    let mut map: HashMap<i32, BTreeSet<i32>> = HashMap::new();
    if ids.is_empty() {
        return Ok(map);
    }

    let links = book_authors::Entity::find()
        .filter(book_authors::Column::BookId.is_in(ids))
        .all(conn)
        .await?;
    for link in links {
        map.entry(link.book_id).or_default().insert(link.author_id);
    }
    Ok(map)
}

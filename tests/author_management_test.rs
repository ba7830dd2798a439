use std::collections::BTreeSet;

use chrono::NaiveDate;
use libris::db;
use libris::domain::{CountryCode, DomainError, Language};
use libris::services::{author_service, book_service, reading_service};
use sea_orm::DatabaseConnection;

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn nationality(code: &str) -> CountryCode {
    CountryCode::parse(code).unwrap()
}

async fn create_author(db: &DatabaseConnection, first: &str, last: &str) -> i32 {
    author_service::create_author(db, first, last, None, None, nationality("US"))
        .await
        .expect("Failed to create author")
        .id()
}

async fn create_book(db: &DatabaseConnection, title: &str, authors: BTreeSet<i32>) -> i32 {
    book_service::create_book(
        db,
        title,
        authors,
        date("2000-05-01"),
        "978-3-16-148410-0",
        320,
        Language::English,
    )
    .await
    .expect("Failed to create book")
    .id()
}

#[tokio::test]
async fn create_and_get_author() {
    let db = setup_test_db().await;

    let created = author_service::create_author(
        &db,
        "  Ursula ",
        "Le Guin",
        Some(date("1929-10-21")),
        Some(date("2018-01-22")),
        nationality("us"),
    )
    .await
    .expect("Failed to create author");

    // Names are trimmed, country codes normalized to upper case.
    assert_eq!(created.first_name(), "Ursula");
    assert_eq!(created.last_name(), "Le Guin");
    assert_eq!(created.nationality().as_str(), "US");

    let fetched = author_service::get_author(&db, created.id())
        .await
        .expect("Failed to fetch author");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn blank_name_rejected() {
    let db = setup_test_db().await;

    let result =
        author_service::create_author(&db, "   ", "Robert", None, None, nationality("US")).await;
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    assert_eq!(author_service::count_authors(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn birth_after_death_rejected() {
    let db = setup_test_db().await;

    let result = author_service::create_author(
        &db,
        "Jordan",
        "Robert",
        Some(date("2000-01-01")),
        Some(date("1990-01-01")),
        nationality("US"),
    )
    .await;
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
}

#[tokio::test]
async fn update_author_shifts_both_dates() {
    let db = setup_test_db().await;
    let id = create_author(&db, "Jordan", "Robert").await;

    // Set an initial life span, then shift both dates to an earlier pair
    // that would conflict with the stored death date taken alone.
    author_service::update_author(
        &db,
        id,
        "Jordan",
        "Robert",
        Some(date("1950-01-01")),
        Some(date("2000-01-01")),
        nationality("US"),
    )
    .await
    .expect("Failed to set life dates");

    let updated = author_service::update_author(
        &db,
        id,
        "Jordan",
        "Robert",
        Some(date("1900-01-01")),
        Some(date("1940-01-01")),
        nationality("GB"),
    )
    .await
    .expect("Failed to shift life dates");

    assert_eq!(updated.birth_date(), Some(date("1900-01-01")));
    assert_eq!(updated.death_date(), Some(date("1940-01-01")));
    assert_eq!(updated.nationality().as_str(), "GB");
}

#[tokio::test]
async fn update_missing_author_not_found() {
    let db = setup_test_db().await;

    let result =
        author_service::update_author(&db, 99, "Jordan", "Robert", None, None, nationality("US"))
            .await;
    assert!(matches!(result, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn delete_author_cascades_to_solely_authored_books() {
    let db = setup_test_db().await;
    let jordan = create_author(&db, "Jordan", "Robert").await;
    let sanderson = create_author(&db, "Brandon", "Sanderson").await;

    let solo = create_book(&db, "The Eye of the World", BTreeSet::from([jordan])).await;
    let shared =
        create_book(&db, "The Gathering Storm", BTreeSet::from([jordan, sanderson])).await;

    // The solo book carries a reading and a series membership that must go
    // down with it.
    reading_service::create_reading(&db, solo, date("2020-01-01"), None, 30)
        .await
        .expect("Failed to create reading");
    book_service::create_series(&db, "The Wheel of Time", BTreeSet::from([solo, shared]))
        .await
        .expect("Failed to create series");

    author_service::delete_author(&db, jordan)
        .await
        .expect("Failed to delete author");

    assert!(matches!(
        book_service::get_book(&db, solo).await,
        Err(DomainError::NotFound)
    ));
    assert_eq!(reading_service::count_readings(&db).await.unwrap(), 0);

    // The co-authored book survives with a shrunk author set.
    let survivor = book_service::get_book(&db, shared)
        .await
        .expect("Co-authored book must survive");
    assert_eq!(survivor.authors(), &BTreeSet::from([sanderson]));

    // The series itself survives, now holding only the co-authored book.
    let series = book_service::list_series(&db).await.unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].books(), &BTreeSet::from([shared]));
}

#[tokio::test]
async fn delete_missing_author_not_found() {
    let db = setup_test_db().await;

    let result = author_service::delete_author(&db, 42).await;
    assert!(matches!(result, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn list_books_of_author() {
    let db = setup_test_db().await;
    let author = create_author(&db, "Terry", "Pratchett").await;
    let other = create_author(&db, "Neil", "Gaiman").await;

    let b1 = create_book(&db, "Mort", BTreeSet::from([author])).await;
    let b2 = create_book(&db, "Good Omens", BTreeSet::from([author, other])).await;
    create_book(&db, "Coraline", BTreeSet::from([other])).await;

    let mut ids: Vec<i32> = book_service::find_books_by_author(&db, author)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![b1, b2]);

    assert!(matches!(
        book_service::find_books_by_author(&db, 99).await,
        Err(DomainError::NotFound)
    ));
}

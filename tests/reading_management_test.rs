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

async fn create_book(db: &DatabaseConnection, title: &str) -> i32 {
    let author = author_service::create_author(
        db,
        "Patrick",
        "Rothfuss",
        None,
        None,
        CountryCode::parse("US").unwrap(),
    )
    .await
    .expect("Failed to create author")
    .id();

    book_service::create_book(
        db,
        title,
        BTreeSet::from([author]),
        date("2007-03-27"),
        "978-0-7564-0407-9",
        662,
        Language::English,
    )
    .await
    .expect("Failed to create book")
    .id()
}

#[tokio::test]
async fn create_and_finish_reading() {
    let db = setup_test_db().await;
    let book = create_book(&db, "The Name of the Wind").await;

    let created = reading_service::create_reading(&db, book, date("2023-05-01"), None, 45)
        .await
        .expect("Failed to create reading");
    assert!(!created.is_finished());

    let finished = reading_service::update_reading(
        &db,
        created.id(),
        date("2023-05-01"),
        Some(date("2023-06-15")),
        45,
    )
    .await
    .expect("Failed to finish reading");
    assert!(finished.is_finished());
    assert_eq!(finished.end(), Some(date("2023-06-15")));

    // Reopening the reading is permitted.
    let reopened =
        reading_service::update_reading(&db, created.id(), date("2023-05-01"), None, 45)
            .await
            .expect("Failed to reopen reading");
    assert!(!reopened.is_finished());
}

#[tokio::test]
async fn reading_requires_existing_book() {
    let db = setup_test_db().await;

    let result = reading_service::create_reading(&db, 99, date("2023-05-01"), None, 45).await;
    assert!(matches!(result, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn invalid_period_rejected() {
    let db = setup_test_db().await;
    let book = create_book(&db, "The Name of the Wind").await;

    let result = reading_service::create_reading(
        &db,
        book,
        date("2023-06-01"),
        Some(date("2023-05-01")),
        45,
    )
    .await;
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    assert_eq!(reading_service::count_readings(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn update_shifts_whole_period() {
    let db = setup_test_db().await;
    let book = create_book(&db, "The Name of the Wind").await;

    let reading = reading_service::create_reading(
        &db,
        book,
        date("2023-05-01"),
        Some(date("2023-06-15")),
        45,
    )
    .await
    .unwrap();

    // The new beginning lies after the stored end; the update must still
    // succeed because both dates move together.
    let shifted = reading_service::update_reading(
        &db,
        reading.id(),
        date("2023-07-01"),
        Some(date("2023-08-01")),
        50,
    )
    .await
    .expect("Failed to shift period");
    assert_eq!(shifted.beginning(), date("2023-07-01"));
    assert_eq!(shifted.end(), Some(date("2023-08-01")));
    assert_eq!(shifted.pages_per_hour(), 50);
}

#[tokio::test]
async fn listings_are_ordered_by_beginning_descending() {
    let db = setup_test_db().await;
    let book = create_book(&db, "The Name of the Wind").await;

    let old = reading_service::create_reading(&db, book, date("2020-01-01"), Some(date("2020-02-01")), 45)
        .await
        .unwrap();
    let recent = reading_service::create_reading(&db, book, date("2024-01-01"), None, 45)
        .await
        .unwrap();
    let middle = reading_service::create_reading(&db, book, date("2022-01-01"), Some(date("2022-03-01")), 45)
        .await
        .unwrap();

    let all: Vec<i32> = reading_service::list_readings(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id())
        .collect();
    assert_eq!(all, vec![recent.id(), middle.id(), old.id()]);

    let by_book: Vec<i32> = reading_service::find_readings_by_book(&db, book)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id())
        .collect();
    assert_eq!(by_book, all);
}

#[tokio::test]
async fn delete_reading() {
    let db = setup_test_db().await;
    let book = create_book(&db, "The Name of the Wind").await;
    let reading = reading_service::create_reading(&db, book, date("2023-05-01"), None, 45)
        .await
        .unwrap();

    reading_service::delete_reading(&db, reading.id())
        .await
        .expect("Failed to delete reading");
    assert!(matches!(
        reading_service::get_reading(&db, reading.id()).await,
        Err(DomainError::NotFound)
    ));

    assert!(matches!(
        reading_service::delete_reading(&db, reading.id()).await,
        Err(DomainError::NotFound)
    ));
}

#[tokio::test]
async fn delete_readings_of_one_book() {
    let db = setup_test_db().await;
    let kept = create_book(&db, "The Name of the Wind").await;
    let cleared = create_book(&db, "The Wise Man's Fear").await;

    reading_service::create_reading(&db, kept, date("2023-05-01"), None, 45)
        .await
        .unwrap();
    reading_service::create_reading(&db, cleared, date("2023-06-01"), None, 45)
        .await
        .unwrap();
    reading_service::create_reading(&db, cleared, date("2024-06-01"), None, 45)
        .await
        .unwrap();

    let removed = reading_service::delete_readings_by_book(&db, cleared)
        .await
        .expect("Failed to delete readings");
    assert_eq!(removed, 2);
    assert_eq!(reading_service::count_readings(&db).await.unwrap(), 1);

    // A book without readings is a no-op.
    let removed = reading_service::delete_readings_by_book(&db, cleared)
        .await
        .unwrap();
    assert_eq!(removed, 0);
}

#[tokio::test]
async fn readings_die_with_their_book() {
    let db = setup_test_db().await;
    let book = create_book(&db, "The Name of the Wind").await;

    reading_service::create_reading(&db, book, date("2023-05-01"), None, 45)
        .await
        .unwrap();
    reading_service::create_reading(&db, book, date("2024-05-01"), None, 45)
        .await
        .unwrap();
    assert_eq!(reading_service::count_readings(&db).await.unwrap(), 2);

    book_service::delete_book(&db, book).await.unwrap();

    assert_eq!(reading_service::count_readings(&db).await.unwrap(), 0);
    assert!(matches!(
        reading_service::find_readings_by_book(&db, book).await,
        Err(DomainError::NotFound)
    ));
}

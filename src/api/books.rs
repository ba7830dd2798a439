use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::db::AppState;
use crate::domain::{DomainError, Language};
use crate::services::book_service;

use super::forms::parse_required_date;

/// Form payload for creating and updating books.
#[derive(Deserialize)]
pub struct BookPayload {
    title: String,
    #[serde(default)]
    authors: Vec<i32>,
    published: String,
    isbn: String,
    pages: i32,
    language: String,
}

impl BookPayload {
    fn parse(&self, config: &Config) -> Result<(NaiveDate, Language), DomainError> {
        let published = parse_required_date("published", &self.published)?;
        let language = Language::parse(&self.language)?;
        if !config.is_language_allowed(language) {
            return Err(DomainError::InvalidArgument(format!(
                "Language '{}' is not offered",
                language
            )));
        }
        Ok((published, language))
    }

    fn authors(&self) -> BTreeSet<i32> {
        self.authors.iter().copied().collect()
    }
}

/// Returns the configured language choices for form rendering.
pub async fn list_languages(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.config.languages.clone()))
}

pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    match book_service::list_books(&state.conn).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookPayload>,
) -> impl IntoResponse {
    let (published, language) = match payload.parse(&state.config) {
        Ok(parsed) => parsed,
        Err(e) => return super::error_response(e),
    };

    match book_service::create_book(
        &state.conn,
        &payload.title,
        payload.authors(),
        published,
        &payload.isbn,
        payload.pages,
        language,
    )
    .await
    {
        Ok(book) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match book_service::get_book(&state.conn, id).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BookPayload>,
) -> impl IntoResponse {
    let (published, language) = match payload.parse(&state.config) {
        Ok(parsed) => parsed,
        Err(e) => return super::error_response(e),
    };

    match book_service::update_book(
        &state.conn,
        id,
        &payload.title,
        payload.authors(),
        published,
        &payload.isbn,
        payload.pages,
        language,
    )
    .await
    {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match book_service::delete_book(&state.conn, id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Book deleted" }))).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn list_books_by_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::find_books_by_author(&state.conn, id).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => super::error_response(e),
    }
}

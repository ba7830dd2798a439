use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::AppState;
use crate::services::book_service;

/// Form payload for creating and updating series. An absent book list on
/// update leaves the membership untouched.
#[derive(Deserialize)]
pub struct SeriesPayload {
    title: String,
    #[serde(default)]
    books: Option<Vec<i32>>,
}

#[derive(Deserialize)]
pub struct AddBooksPayload {
    books: Vec<i32>,
}

fn to_set(books: &[i32]) -> BTreeSet<i32> {
    books.iter().copied().collect()
}

pub async fn list_series(State(state): State<AppState>) -> impl IntoResponse {
    match book_service::list_series(&state.conn).await {
        Ok(series) => (StatusCode::OK, Json(series)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn create_series(
    State(state): State<AppState>,
    Json(payload): Json<SeriesPayload>,
) -> impl IntoResponse {
    let books = payload.books.as_deref().map(to_set).unwrap_or_default();
    match book_service::create_series(&state.conn, &payload.title, books).await {
        Ok(series) => (StatusCode::CREATED, Json(series)).into_response(),
        Err(e) => super::error_response(e),
    }
}

/// Returns the series with its books ordered by publication date and its
/// authors ordered by contribution count.
pub async fn get_series(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match book_service::get_series_detail(&state.conn, id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn update_series(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SeriesPayload>,
) -> impl IntoResponse {
    let books = payload.books.as_deref().map(to_set);
    match book_service::update_series(&state.conn, id, &payload.title, books).await {
        Ok(series) => (StatusCode::OK, Json(series)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn delete_series(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::delete_series(&state.conn, id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Series deleted" }))).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn add_books(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AddBooksPayload>,
) -> impl IntoResponse {
    match book_service::add_books_to_series(&state.conn, to_set(&payload.books), id).await {
        Ok((series, changed)) => (
            StatusCode::OK,
            Json(json!({ "series": series, "changed": changed })),
        )
            .into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn list_series_by_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::find_series_by_book(&state.conn, id).await {
        Ok(series) => (StatusCode::OK, Json(series)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub mod author;
pub mod books;
pub mod forms;
pub mod health;
pub mod reading;
pub mod series;
pub mod stats;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::db::AppState;
use crate::domain::DomainError;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health & dashboard
        .route("/health", get(health::health_check))
        .route("/stats", get(stats::get_stats))
        .route("/languages", get(books::list_languages))
        // Authors
        .route(
            "/authors",
            get(author::list_authors).post(author::create_author),
        )
        .route(
            "/authors/:id",
            get(author::get_author)
                .put(author::update_author)
                .delete(author::delete_author),
        )
        .route("/authors/:id/books", get(books::list_books_by_author))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/series", get(series::list_series_by_book))
        .route("/books/:id/readings", get(reading::list_readings_by_book))
        // Series
        .route(
            "/series",
            get(series::list_series).post(series::create_series),
        )
        .route(
            "/series/:id",
            get(series::get_series)
                .put(series::update_series)
                .delete(series::delete_series),
        )
        .route("/series/:id/books", axum::routing::post(series::add_books))
        // Readings
        .route(
            "/readings",
            get(reading::list_readings).post(reading::create_reading),
        )
        .route(
            "/readings/:id",
            get(reading::get_reading)
                .put(reading::update_reading)
                .delete(reading::delete_reading),
        )
        .with_state(state)
}

/// Maps a domain failure onto an HTTP response.
pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::MissingValue(_) | DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{}", err);
    }
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::db::AppState;
use crate::services::{author_service, book_service, reading_service};

/// Entity counts for the dashboard.
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    let counts = async {
        Ok::<_, crate::domain::DomainError>((
            author_service::count_authors(&state.conn).await?,
            book_service::count_books(&state.conn).await?,
            book_service::count_series(&state.conn).await?,
            reading_service::count_readings(&state.conn).await?,
        ))
    };

    match counts.await {
        Ok((authors, books, series, readings)) => (
            StatusCode::OK,
            Json(json!({
                "authors": authors,
                "books": books,
                "series": series,
                "readings": readings,
            })),
        )
            .into_response(),
        Err(e) => super::error_response(e),
    }
}

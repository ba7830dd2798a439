use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::db::AppState;
use crate::domain::DomainError;
use crate::services::reading_service;

use super::forms::{parse_optional_date, parse_required_date};

/// Form payload for starting a reading.
#[derive(Deserialize)]
pub struct CreateReadingPayload {
    book_id: i32,
    beginning: String,
    #[serde(default)]
    end: Option<String>,
    pages_per_hour: i32,
}

/// Form payload for editing a reading. The book reference cannot be
/// changed after creation.
#[derive(Deserialize)]
pub struct EditReadingPayload {
    beginning: String,
    #[serde(default)]
    end: Option<String>,
    pages_per_hour: i32,
}

fn parse_period(
    beginning: &str,
    end: Option<&str>,
) -> Result<(NaiveDate, Option<NaiveDate>), DomainError> {
    Ok((
        parse_required_date("beginning", beginning)?,
        parse_optional_date("end", end)?,
    ))
}

pub async fn list_readings(State(state): State<AppState>) -> impl IntoResponse {
    match reading_service::list_readings(&state.conn).await {
        Ok(readings) => (StatusCode::OK, Json(readings)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn create_reading(
    State(state): State<AppState>,
    Json(payload): Json<CreateReadingPayload>,
) -> impl IntoResponse {
    let (beginning, end) = match parse_period(&payload.beginning, payload.end.as_deref()) {
        Ok(parsed) => parsed,
        Err(e) => return super::error_response(e),
    };

    match reading_service::create_reading(
        &state.conn,
        payload.book_id,
        beginning,
        end,
        payload.pages_per_hour,
    )
    .await
    {
        Ok(reading) => (StatusCode::CREATED, Json(reading)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn get_reading(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match reading_service::get_reading(&state.conn, id).await {
        Ok(reading) => (StatusCode::OK, Json(reading)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn update_reading(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<EditReadingPayload>,
) -> impl IntoResponse {
    let (beginning, end) = match parse_period(&payload.beginning, payload.end.as_deref()) {
        Ok(parsed) => parsed,
        Err(e) => return super::error_response(e),
    };

    match reading_service::update_reading(&state.conn, id, beginning, end, payload.pages_per_hour)
        .await
    {
        Ok(reading) => (StatusCode::OK, Json(reading)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn delete_reading(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match reading_service::delete_reading(&state.conn, id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Reading deleted" }))).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn list_readings_by_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match reading_service::find_readings_by_book(&state.conn, id).await {
        Ok(readings) => (StatusCode::OK, Json(readings)).into_response(),
        Err(e) => super::error_response(e),
    }
}

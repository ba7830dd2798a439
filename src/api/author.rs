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
use crate::domain::{CountryCode, DomainError};
use crate::services::author_service;

use super::forms::parse_optional_date;

/// Form payload for creating and updating authors.
#[derive(Deserialize)]
pub struct AuthorPayload {
    first_name: String,
    last_name: String,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    death_date: Option<String>,
    nationality: String,
}

impl AuthorPayload {
    fn parse(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>, CountryCode), DomainError> {
        Ok((
            parse_optional_date("birth_date", self.birth_date.as_deref())?,
            parse_optional_date("death_date", self.death_date.as_deref())?,
            CountryCode::parse(&self.nationality)?,
        ))
    }
}

pub async fn list_authors(State(state): State<AppState>) -> impl IntoResponse {
    match author_service::list_authors(&state.conn).await {
        Ok(authors) => (StatusCode::OK, Json(authors)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<AuthorPayload>,
) -> impl IntoResponse {
    let (birth, death, nationality) = match payload.parse() {
        Ok(parsed) => parsed,
        Err(e) => return super::error_response(e),
    };

    match author_service::create_author(
        &state.conn,
        &payload.first_name,
        &payload.last_name,
        birth,
        death,
        nationality,
    )
    .await
    {
        Ok(author) => (StatusCode::CREATED, Json(author)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn get_author(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match author_service::get_author(&state.conn, id).await {
        Ok(author) => (StatusCode::OK, Json(author)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorPayload>,
) -> impl IntoResponse {
    let (birth, death, nationality) = match payload.parse() {
        Ok(parsed) => parsed,
        Err(e) => return super::error_response(e),
    };

    match author_service::update_author(
        &state.conn,
        id,
        &payload.first_name,
        &payload.last_name,
        birth,
        death,
        nationality,
    )
    .await
    {
        Ok(author) => (StatusCode::OK, Json(author)).into_response(),
        Err(e) => super::error_response(e),
    }
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match author_service::delete_author(&state.conn, id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Author deleted" }))).into_response(),
        Err(e) => super::error_response(e),
    }
}

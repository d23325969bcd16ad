//! Journal entry endpoints. All of them need an authenticated caller and
//! only ever see the caller's own entries.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use journey_core::params::NewJournalEntry;
use serde_json::{json, Value};
use uuid::Uuid;

use super::message;
use crate::{
    auth::CurrentUser,
    error::AppError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_entry))
        .route("/{journal_entry_id}", get(get_entry).delete(delete_entry))
}

async fn create_entry(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(params): ApiJson<NewJournalEntry>,
) -> Result<Json<Value>, AppError> {
    let entry = state
        .journey
        .create_journal_entry(current.caller(), params)
        .await?;
    Ok(Json(json!({ "message": "Entry created.", "entry": entry })))
}

async fn get_entry(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(entry_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let entry = state
        .journey
        .get_journal_entry(current.caller(), entry_id)
        .await?;
    Ok(Json(json!({ "entry": entry })))
}

async fn delete_entry(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(entry_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    state
        .journey
        .delete_journal_entry(current.caller(), entry_id)
        .await?;
    Ok(message("Entry deleted."))
}

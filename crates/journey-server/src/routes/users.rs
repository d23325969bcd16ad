//! Account endpoints. Everything except sign-up is limited to the caller's
//! own account.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use journey_core::params::{ListJournalEntries, Page, SignUp, UpdateUser};
use serde_json::{json, Value};
use uuid::Uuid;

use super::message;
use crate::{
    analytics::events,
    auth::CurrentUser,
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(sign_up))
        .route("/{user_id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{user_id}/trips", get(list_trips))
        .route("/{user_id}/entries", get(list_entries))
}

async fn sign_up(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<SignUp>,
) -> Result<Json<Value>, AppError> {
    log::debug!("sign_up: {}", params.email);
    let user = state.journey.sign_up(params).await?;
    let token = state.tokens.issue(user.id)?;

    state.analytics.identify(
        Some(user.id),
        &json!({ "email": user.email, "name": user.name, "username": user.username }),
    );
    state.analytics.track(Some(user.id), events::SIGN_UP, &json!({}));

    Ok(Json(json!({
        "message": "User created successfully.",
        "user": user,
        "token": token,
    })))
}

async fn get_user(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let user = state.journey.get_user(current.caller(), user_id).await?;
    state
        .analytics
        .track(Some(user.id), events::VIEW_USER, &json!({}));
    Ok(Json(json!({ "user": user })))
}

async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(params): ApiJson<UpdateUser>,
) -> Result<Json<Value>, AppError> {
    let (user, changed) = state
        .journey
        .update_user(current.caller(), user_id, params)
        .await?;
    let token = state.tokens.issue(user.id)?;

    state.analytics.identify(
        Some(user.id),
        &json!({ "email": user.email, "name": user.name, "username": user.username }),
    );
    state.analytics.track(
        Some(user.id),
        events::UPDATE_USER,
        &json!({ "fields": changed.join(",") }),
    );

    Ok(Json(json!({
        "message": "User updated successfully.",
        "token": token,
        "user": user,
    })))
}

async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.journey.delete_user(current.caller(), user_id).await?;
    state
        .analytics
        .track(Some(user_id), events::DELETE_USER, &json!({}));
    Ok(message("User deleted."))
}

async fn list_trips(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(page): ApiQuery<Page>,
) -> Result<Json<Value>, AppError> {
    let trips = state
        .journey
        .list_trips(current.caller(), user_id, page)
        .await?;

    Ok(Json(json!({
        "page": page.number(),
        "results": trips.len(),
        "trips": trips,
    })))
}

async fn list_entries(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListJournalEntries>,
) -> Result<Json<Value>, AppError> {
    let entries = state
        .journey
        .list_journal_entries(current.caller(), user_id, query)
        .await?;

    Ok(Json(json!({
        "page": query.page().number(),
        "results": entries.len(),
        "entries": entries,
    })))
}

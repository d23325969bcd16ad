//! Client-side analytics forwarding.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::message;
use crate::{
    auth::MaybeUser,
    error::AppError,
    extract::ApiJson,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/identify", post(identify))
        .route("/track", post(track))
        .route("/page", post(page))
}

#[derive(Debug, Default, Deserialize)]
struct IdentifyBody {
    #[serde(default)]
    traits: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct TrackBody {
    event: Option<String>,
    #[serde(default)]
    properties: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct PageBody {
    name: Option<String>,
    #[serde(default)]
    properties: Map<String, Value>,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{field}'")))
}

async fn identify(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiJson(body): ApiJson<IdentifyBody>,
) -> Json<Value> {
    let caller = user.caller();
    state
        .analytics
        .identify(caller.user_id(), &Value::Object(body.traits));
    message("identify() event logged successfully.")
}

async fn track(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiJson(body): ApiJson<TrackBody>,
) -> Result<Json<Value>, AppError> {
    let event = required(body.event, "event")?;
    state.analytics.track(
        user.caller().user_id(),
        &event,
        &Value::Object(body.properties),
    );
    Ok(message("track() event logged successfully."))
}

async fn page(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiJson(body): ApiJson<PageBody>,
) -> Result<Json<Value>, AppError> {
    let name = required(body.name, "name")?;
    state.analytics.page(
        user.caller().user_id(),
        &name,
        &Value::Object(body.properties),
    );
    Ok(message("page() event logged successfully."))
}

use axum::{extract::State, routing::post, Json, Router};
use journey_core::params::Login;
use serde_json::{json, Value};

use crate::{
    analytics::events,
    error::AppError,
    extract::ApiJson,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<Login>,
) -> Result<Json<Value>, AppError> {
    log::debug!("login: username={:?} email={:?}", params.username, params.email);
    let login_type = if params.username.is_some() { "username" } else { "email" };

    let user = state.journey.login(params).await?;
    let token = state.tokens.issue(user.id)?;

    state.analytics.track(
        Some(user.id),
        events::LOG_IN,
        &json!({ "loginType": login_type }),
    );

    Ok(Json(json!({ "user": user, "token": token })))
}

//! Route table.
//!
//! Everything except the health check lives under `/v1`.

use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub mod analytics;
pub mod auth;
pub mod entries;
pub mod trips;
pub mod users;

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let v1 = Router::new()
        .nest("/auth", auth::routes())
        .nest("/users", users::routes())
        .nest("/entries", entries::routes())
        .nest("/trips", trips::routes())
        .nest("/analytics", analytics::routes());

    Router::new()
        .route(HEALTH_PATH, get(health))
        .nest("/v1", v1)
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `{ "message": ... }` confirmation body.
pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

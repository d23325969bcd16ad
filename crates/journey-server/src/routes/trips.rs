//! Trip endpoints: the trip itself, its ideas, its plan days and the
//! entries of each day.
//!
//! GET handlers need read access to the trip, every other method needs
//! write access. Both checks happen in the core service.

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use journey_core::params::{
    CreateTrip, NewIdea, NewPlanEntry, RemovePlanEntry, UpdateDay, UpdateIdea, UpdatePlanEntry,
    UpdateTrip,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::message;
use crate::{
    analytics::events,
    auth::{CurrentUser, MaybeUser},
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/{trip_id}", get(get_trip).put(update_trip).delete(delete_trip))
        .route(
            "/{trip_id}/ideas",
            get(list_ideas).post(add_idea).delete(clear_ideas),
        )
        .route(
            "/{trip_id}/ideas/{idea_id}",
            put(update_idea).delete(remove_idea),
        )
        .route("/{trip_id}/plan", get(get_plan).post(add_day))
        .route(
            "/{trip_id}/plan/{day_id}",
            get(get_day).put(update_day).delete(remove_day),
        )
        .route("/{trip_id}/plan/{day_id}/entries", post(add_entry))
        .route(
            "/{trip_id}/plan/{day_id}/entries/{entry_id}",
            put(update_entry).delete(remove_entry),
        )
}

// ----------------------------------------------------------------------
// Trips
// ----------------------------------------------------------------------

async fn create_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(params): ApiJson<CreateTrip>,
) -> Result<Json<Value>, AppError> {
    log::debug!("create_trip: {:?}", params.title);
    let trip = state.journey.create_trip(current.caller(), params).await?;

    state.analytics.track(
        Some(current.0.id),
        events::CREATE_TRIP,
        &json!({ "tripId": trip.id, "title": trip.title }),
    );

    Ok(Json(json!({ "trip": trip })))
}

async fn get_trip(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let trip = state.journey.get_trip(user.caller(), trip_id).await?;
    Ok(Json(json!({ "trip": trip })))
}

async fn update_trip(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath(trip_id): ApiPath<Uuid>,
    ApiJson(params): ApiJson<UpdateTrip>,
) -> Result<Json<Value>, AppError> {
    let trip = state
        .journey
        .update_trip(user.caller(), trip_id, params)
        .await?;
    Ok(Json(json!({
        "message": "Trip updated successfully.",
        "trip": trip,
    })))
}

async fn delete_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.journey.delete_trip(current.caller(), trip_id).await?;

    state.analytics.track(
        Some(current.0.id),
        events::DELETE_TRIP,
        &json!({ "tripId": trip_id }),
    );

    Ok(message("Trip deleted."))
}

// ----------------------------------------------------------------------
// Ideas
// ----------------------------------------------------------------------

async fn list_ideas(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let ideas = state.journey.list_ideas(user.caller(), trip_id).await?;
    Ok(Json(json!({ "tripId": trip_id, "ideas": ideas })))
}

async fn add_idea(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath(trip_id): ApiPath<Uuid>,
    ApiJson(params): ApiJson<NewIdea>,
) -> Result<Json<Value>, AppError> {
    let caller = user.caller();
    let (trip, idea_id) = state.journey.add_idea(caller, trip_id, params).await?;

    state.analytics.track(
        caller.user_id(),
        events::ADD_TRIP_IDEA,
        &json!({ "tripId": trip_id, "ideaId": idea_id }),
    );

    Ok(Json(json!({ "tripId": trip_id, "ideas": trip.ideas })))
}

async fn update_idea(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, idea_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(params): ApiJson<UpdateIdea>,
) -> Result<Json<Value>, AppError> {
    let trip = state
        .journey
        .update_idea(user.caller(), trip_id, idea_id, params)
        .await?;
    Ok(Json(json!({
        "message": "Trip idea updated successfully.",
        "tripId": trip_id,
        "ideas": trip.ideas,
    })))
}

async fn remove_idea(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, idea_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let trip = state
        .journey
        .remove_idea(user.caller(), trip_id, idea_id)
        .await?;
    Ok(Json(json!({
        "message": "Trip idea deleted successfully.",
        "tripId": trip_id,
        "ideas": trip.ideas,
    })))
}

async fn clear_ideas(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.journey.clear_ideas(user.caller(), trip_id).await?;
    Ok(message("Trip ideas deleted."))
}

// ----------------------------------------------------------------------
// Plan days
// ----------------------------------------------------------------------

async fn get_plan(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let plan = state.journey.get_plan(user.caller(), trip_id).await?;
    Ok(Json(json!({ "tripId": trip_id, "plan": plan })))
}

async fn add_day(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let trip = state.journey.add_day(user.caller(), trip_id).await?;
    Ok(Json(json!({ "tripId": trip_id, "plan": trip.plan })))
}

async fn get_day(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, day_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let (index, day) = state
        .journey
        .get_day(user.caller(), trip_id, day_id)
        .await?;
    Ok(Json(json!({ "index": index, "tripDay": day })))
}

async fn update_day(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, day_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(params): ApiJson<UpdateDay>,
) -> Result<Json<Value>, AppError> {
    let (index, day) = state
        .journey
        .update_day(user.caller(), trip_id, day_id, params)
        .await?;
    Ok(Json(json!({ "index": index, "tripDay": day })))
}

async fn remove_day(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, day_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    state
        .journey
        .remove_day(user.caller(), trip_id, day_id)
        .await?;
    Ok(message("Trip day deleted successfully."))
}

// ----------------------------------------------------------------------
// Plan entries
// ----------------------------------------------------------------------

async fn add_entry(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, day_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(params): ApiJson<NewPlanEntry>,
) -> Result<Json<Value>, AppError> {
    let day = state
        .journey
        .add_plan_entry(user.caller(), trip_id, day_id, params)
        .await?;
    Ok(Json(json!({ "dayId": day.id, "entries": day.entries })))
}

async fn update_entry(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, day_id, entry_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    ApiJson(params): ApiJson<UpdatePlanEntry>,
) -> Result<Json<Value>, AppError> {
    let day = state
        .journey
        .update_plan_entry(user.caller(), trip_id, day_id, entry_id, params)
        .await?;
    Ok(Json(json!({ "dayId": day.id, "entries": day.entries })))
}

async fn remove_entry(
    State(state): State<AppState>,
    user: MaybeUser,
    ApiPath((trip_id, day_id, entry_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    ApiQuery(options): ApiQuery<RemovePlanEntry>,
) -> Result<Json<Value>, AppError> {
    state
        .journey
        .remove_plan_entry(user.caller(), trip_id, day_id, entry_id, options)
        .await?;
    Ok(message("Trip entry deleted successfully."))
}

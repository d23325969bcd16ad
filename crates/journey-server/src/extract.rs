//! Request extractors whose rejections use the API's `{ "message" }` error
//! format instead of axum's plain-text bodies.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, RawPathParams, Request},
    http::request::Parts,
    Json,
};
use journey_core::{JourneyError, Resource};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::AppError;

/// Resource a path parameter identifies, by parameter name.
fn path_resource(name: &str) -> Option<Resource> {
    match name {
        "trip_id" => Some(Resource::Trip),
        "idea_id" => Some(Resource::Idea),
        "day_id" => Some(Resource::Day),
        "entry_id" => Some(Resource::PlanEntry),
        "journal_entry_id" => Some(Resource::JournalEntry),
        "user_id" => Some(Resource::User),
        _ => None,
    }
}

/// JSON body extractor.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| ApiJson(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

/// Path extractor. An id that does not parse cannot name an existing
/// record, so it is reported as that record not being found.
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let rejection = match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => return Ok(ApiPath(value)),
            Err(rejection) => rejection,
        };

        let malformed = RawPathParams::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|params| {
                params.iter().find_map(|(name, value)| {
                    let resource = path_resource(name)?;
                    value
                        .parse::<Uuid>()
                        .is_err()
                        .then(|| JourneyError::not_found(resource, value))
                })
            });

        Err(match malformed {
            Some(err) => AppError::Journey(err),
            None => AppError::BadRequest(rejection.body_text()),
        })
    }
}

/// Query string extractor.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use journey_core::JourneyError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Journey(#[from] JourneyError),

    /// Missing credentials on an endpoint that needs them
    #[error("Authentication required")]
    Unauthenticated,

    /// Malformed, expired or revoked token
    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to issue token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Journey(e) => match e {
                JourneyError::InvalidIndex { .. }
                | JourneyError::InvalidInput { .. }
                | JourneyError::AlreadyExists { .. } => StatusCode::BAD_REQUEST,
                JourneyError::NotAuthorized | JourneyError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                JourneyError::Forbidden { .. } => StatusCode::FORBIDDEN,
                JourneyError::NotFound { .. } | JourneyError::TargetNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                JourneyError::RevisionConflict { .. } => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Unauthenticated | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            log::error!("request failed: {self}");
            "Internal server error".to_string()
        } else {
            log::debug!("request rejected ({status}): {self}");
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

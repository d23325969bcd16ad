//! Access tokens and the extractors that resolve the caller.
//!
//! Clients send `Authorization: JWT <token>` (or `Bearer <token>`). A
//! request without the header is anonymous. A request with a header that
//! does not resolve to an existing account is rejected outright rather
//! than downgraded to anonymous.

use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jiff::Timestamp;
use journey_core::{Caller, User};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Scheme prefix used in responses.
pub const TOKEN_SCHEME: &str = "JWT";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: u64,
}

/// Signs and checks HS256 access tokens.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn from_days(secret: &[u8], days: u32) -> Self {
        Self::new(secret, Duration::from_secs(u64::from(days) * 24 * 60 * 60))
    }

    /// Issues a token for `user_id`, formatted for the `Authorization`
    /// header.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = u64::try_from(Timestamp::now().as_second()).unwrap_or_default();
        let claims = Claims {
            sub: user_id,
            exp: now + self.ttl.as_secs(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(format!("{TOKEN_SCHEME} {token}"))
    }

    /// Returns the user id a token was issued for.
    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims.sub)
            .map_err(|e| {
                log::debug!("token rejected: {e}");
                AppError::InvalidToken
            })
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    let known = scheme.eq_ignore_ascii_case(TOKEN_SCHEME) || scheme.eq_ignore_ascii_case("Bearer");
    (known && !token.is_empty()).then_some(token)
}

async fn resolve_user(parts: &Parts, state: &AppState) -> Result<Option<User>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or(AppError::InvalidToken)?;
    let user_id = state.tokens.verify(token)?;

    match state.journey.find_user(user_id).await? {
        Some(user) => Ok(Some(user)),
        None => Err(AppError::InvalidToken),
    }
}

/// The caller, anonymous if no credentials were sent.
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn caller(&self) -> Caller {
        Caller::from(self.0.as_ref().map(|u| u.id))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state).await.map(MaybeUser)
    }
}

/// An authenticated caller.
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn caller(&self) -> Caller {
        Caller::User(self.0.id)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state)
            .await?
            .map(CurrentUser)
            .ok_or(AppError::Unauthenticated)
    }
}

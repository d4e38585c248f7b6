// Authenticated-user extraction
//
// Authentication itself lives outside this service. Requests arrive with an
// opaque user id in the x-user-id header, stamped by the auth layer in front
// of us, and that value is trusted as-is.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::RewardsError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for routes that require an authenticated user
pub struct AuthUser(pub Uuid);

/// Extractor for routes that also accept guests
pub struct MaybeAuthUser(pub Option<Uuid>);

fn user_id_from_parts(parts: &Parts) -> Option<Uuid> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = RewardsError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_id_from_parts(parts)
            .map(AuthUser)
            .ok_or(RewardsError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(user_id_from_parts(parts)))
    }
}

//! Authentication extractor
//!
//! Extracts and verifies the bearer token from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use scheduler_core::RecordId;

use crate::response::ApiError;
use crate::state::AppState;

/// Parent identified by the request's bearer token
#[derive(Debug, Clone)]
pub struct AuthParent {
    pub parent_id: RecordId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthParent
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state.jwt_service().verify(bearer.token()).map_err(|e| {
            tracing::warn!(error = %e, "Invalid access token");
            ApiError::InvalidAuthFormat
        })?;

        let parent_id = claims.parent_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid parent id in token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthParent { parent_id })
    }
}

//! Path parameter extractor
//!
//! Parses a single `{id}` segment into a [`RecordId`].

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use scheduler_core::RecordId;

use crate::response::ApiError;

/// Record id taken from the route's only path parameter
#[derive(Debug, Clone)]
pub struct RecordIdPath(pub RecordId);

#[async_trait]
impl<S> FromRequestParts<S> for RecordIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        RecordId::parse(&raw)
            .map(RecordIdPath)
            .map_err(|e| ApiError::invalid_path(e.to_string()))
    }
}

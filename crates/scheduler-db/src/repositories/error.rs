//! Error handling utilities for repositories

use scheduler_core::error::DomainError;
use scheduler_core::traits::RepoResult;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Convert fetched rows into entities, failing on the first malformed row
pub fn into_entities<M, T>(rows: Vec<M>) -> RepoResult<Vec<T>>
where
    T: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Convert an optional row into an entity
pub fn into_entity<M, T>(row: Option<M>) -> RepoResult<Option<T>>
where
    T: TryFrom<M, Error = DomainError>,
{
    row.map(T::try_from).transpose()
}

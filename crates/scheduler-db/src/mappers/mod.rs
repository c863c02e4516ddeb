//! Entity to model mappers
//!
//! Conversions between domain entities (scheduler-core) and database rows.
//! Rows are parsed with `TryFrom`: an unknown status string or malformed id
//! means the row was written by something else and is reported as a
//! database error rather than silently coerced.

mod approval_request;
mod child;
mod delivery_log;
mod friendship;
mod invitation;
mod parent;

use scheduler_core::{DomainError, RecordId};

/// Parse a stored id column
pub(crate) fn parse_id(column: &'static str, raw: &str) -> Result<RecordId, DomainError> {
    RecordId::parse(raw).map_err(|e| corrupt(column, &format!("{raw:?} ({e})")))
}

pub(crate) fn parse_ids(column: &'static str, raw: &[String]) -> Result<Vec<RecordId>, DomainError> {
    raw.iter().map(|id| parse_id(column, id)).collect()
}

/// Error for a stored value the domain cannot represent
pub(crate) fn corrupt(column: &'static str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("unexpected value in {column}: {value}"))
}

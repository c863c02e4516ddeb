//! Value objects - immutable types that represent domain concepts

mod email;
mod record_id;

pub use email::EmailAddress;
pub use record_id::{RecordId, RecordIdParseError};

//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path ids, and validated bodies.

mod auth;
mod path;
mod validated;

pub use auth::AuthParent;
pub use path::RecordIdPath;
pub use validated::ValidatedJson;

//! Record ID - opaque string key for documents in every collection
//!
//! Generated IDs are 20 alphanumeric characters, the same shape a document
//! store assigns automatically. IDs minted elsewhere (identity provider
//! subjects, imported documents) are accepted as long as they are non-empty,
//! at most [`RecordId::MAX_LEN`] bytes, and free of whitespace and `/`.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque record identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Length of generated IDs
    pub const GENERATED_LEN: usize = 20;

    /// Longest ID accepted from outside
    pub const MAX_LEN: usize = 128;

    const CHARSET: &'static [u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    /// Generate a fresh random ID
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..Self::GENERATED_LEN)
            .map(|_| Self::CHARSET[rng.gen_range(0..Self::CHARSET.len())] as char)
            .collect();
        Self(id)
    }

    /// Parse an ID supplied by a caller
    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        if s.is_empty() {
            return Err(RecordIdParseError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(RecordIdParseError::TooLong);
        }
        if s.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(RecordIdParseError::InvalidCharacter);
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the ID as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the inner String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a RecordId from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdParseError {
    #[error("record id is empty")]
    Empty,

    #[error("record id is too long")]
    TooLong,

    #[error("record id contains an invalid character")]
    InvalidCharacter,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        RecordId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

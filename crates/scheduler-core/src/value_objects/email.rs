//! Email address value object
//!
//! Addresses are trimmed and lowercased on parse so that invitations sent to
//! `Jane@Example.com ` are found again when `jane@example.com` signs in.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use validator::ValidateEmail;

use crate::error::DomainError;

/// Syntactically valid, normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalize a raw address
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() || !normalized.validate_email() {
            return Err(DomainError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EmailAddress::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let email = EmailAddress::parse("  B-Parent@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "b-parent@example.com");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for raw in ["", "   ", "not-an-email", "a@", "@example.com", "a b@example.com"] {
            assert!(
                matches!(EmailAddress::parse(raw), Err(DomainError::InvalidEmail)),
                "{raw:?} should be rejected"
            );
        }
    }
}

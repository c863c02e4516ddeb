//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::InvitationStatus;
use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Invitation not found: {0}")]
    InvitationNotFound(RecordId),

    #[error("Approval request not found: {0}")]
    ApprovalRequestNotFound(RecordId),

    #[error("Friendship not found: {0}")]
    FriendshipNotFound(RecordId),

    #[error("Child not found: {0}")]
    ChildNotFound(RecordId),

    #[error("Parent not found: {0}")]
    ParentNotFound(RecordId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Invalid State Errors
    // =========================================================================
    #[error("Invitation is {actual}, expected {expected}")]
    InvalidInvitationState {
        expected: InvitationStatus,
        actual: InvitationStatus,
    },

    #[error("Invitation is already {0}")]
    InvitationClosed(InvitationStatus),

    #[error("Invitation has expired")]
    InvitationExpired,

    #[error("Approval request has already been answered or expired")]
    ApprovalRequestNotPending,

    #[error("Approval request has expired")]
    ApprovalRequestExpired,

    #[error("Invitation has no recipient attached")]
    MissingRecipientInfo,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Parent is not a party to this friendship")]
    NotFriendshipParent,

    #[error("Only the sending child's parent may do this")]
    NotInvitationSender,

    #[error("Approval request belongs to another parent")]
    NotRequestParent,

    #[error("Child belongs to another parent")]
    NotChildParent,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Children are already friends")]
    AlreadyFriends,

    // =========================================================================
    // Delivery Errors (never surfaced to workflow callers)
    // =========================================================================
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::InvitationNotFound(_) => "UNKNOWN_INVITATION",
            Self::ApprovalRequestNotFound(_) => "UNKNOWN_APPROVAL_REQUEST",
            Self::FriendshipNotFound(_) => "UNKNOWN_FRIENDSHIP",
            Self::ChildNotFound(_) => "UNKNOWN_CHILD",
            Self::ParentNotFound(_) => "UNKNOWN_PARENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Invalid state
            Self::InvalidInvitationState { .. } => "INVALID_INVITATION_STATE",
            Self::InvitationClosed(_) => "INVITATION_CLOSED",
            Self::InvitationExpired => "INVITATION_EXPIRED",
            Self::ApprovalRequestNotPending => "APPROVAL_REQUEST_NOT_PENDING",
            Self::ApprovalRequestExpired => "APPROVAL_REQUEST_EXPIRED",
            Self::MissingRecipientInfo => "MISSING_RECIPIENT_INFO",

            // Authorization
            Self::NotFriendshipParent => "NOT_FRIENDSHIP_PARENT",
            Self::NotInvitationSender => "NOT_INVITATION_SENDER",
            Self::NotRequestParent => "NOT_REQUEST_PARENT",
            Self::NotChildParent => "NOT_CHILD_PARENT",

            // Conflict
            Self::AlreadyFriends => "ALREADY_FRIENDS",

            Self::DeliveryFailed(_) => "DELIVERY_FAILED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::InvitationNotFound(_)
                | Self::ApprovalRequestNotFound(_)
                | Self::FriendshipNotFound(_)
                | Self::ChildNotFound(_)
                | Self::ParentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidEmail | Self::ContentTooLong { .. }
        )
    }

    /// Check if the operation was attempted from a state that does not permit it
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::InvalidInvitationState { .. }
                | Self::InvitationClosed(_)
                | Self::InvitationExpired
                | Self::ApprovalRequestNotPending
                | Self::ApprovalRequestExpired
                | Self::MissingRecipientInfo
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotFriendshipParent
                | Self::NotInvitationSender
                | Self::NotRequestParent
                | Self::NotChildParent
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyFriends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let id = RecordId::parse("abc").unwrap();

        assert!(DomainError::InvitationNotFound(id.clone()).is_not_found());
        assert!(DomainError::InvalidEmail.is_validation());
        assert!(DomainError::InvitationExpired.is_invalid_state());
        assert!(DomainError::NotFriendshipParent.is_authorization());
        assert!(DomainError::AlreadyFriends.is_conflict());
        assert!(!DomainError::DeliveryFailed("smtp".into()).is_invalid_state());
        assert_eq!(
            DomainError::ApprovalRequestNotFound(id).code(),
            "UNKNOWN_APPROVAL_REQUEST"
        );
    }

    #[test]
    fn test_invalid_state_message_uses_wire_names() {
        let err = DomainError::InvalidInvitationState {
            expected: InvitationStatus::PendingRecipient,
            actual: InvitationStatus::DeniedBySenderParent,
        };
        assert_eq!(
            err.to_string(),
            "Invitation is deniedBySenderParent, expected pendingRecipient"
        );
    }
}

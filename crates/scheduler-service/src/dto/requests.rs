//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Wire names are camelCase.

use scheduler_core::RecordId;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Parent Requests
// ============================================================================

/// Create or update the caller's parent profile
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertParentRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Parent name must be 1-100 characters"))]
    pub parent_name: String,
}

/// Register or clear the push token of the caller's device
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTokenRequest {
    /// `null` unregisters the device
    #[validate(length(min = 1, max = 4096, message = "Device token must be 1-4096 characters"))]
    pub device_token: Option<String>,
}

// ============================================================================
// Child Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest {
    #[validate(length(min = 1, max = 50, message = "Child name must be 1-50 characters"))]
    pub child_name: String,

    #[validate(range(min = 0, max = 18, message = "Age must be between 0 and 18"))]
    pub age: Option<i32>,

    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 16, message = "Avatar emoji must be at most 16 characters"))]
    pub avatar_emoji: Option<String>,
}

// ============================================================================
// Invitation Requests
// ============================================================================

/// Invite a friend on behalf of one of the caller's children
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationRequest {
    /// Sending child; must belong to the caller
    pub child_id: RecordId,

    #[validate(email(message = "Invalid email format"))]
    pub recipient_email: String,

    #[validate(length(max = 32, message = "Phone number must be at most 32 characters"))]
    pub recipient_phone: Option<String>,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// Accept an invitation on behalf of one of the caller's children
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationRequest {
    pub child_id: RecordId,
}

// ============================================================================
// Approval Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondToApprovalRequest {
    pub approved: bool,
}

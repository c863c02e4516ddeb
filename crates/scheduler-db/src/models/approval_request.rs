//! Approval request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for approval_requests table
#[derive(Debug, Clone, FromRow)]
pub struct ApprovalRequestModel {
    pub id: String,
    pub parent_id: String,
    pub child_id: String,
    pub child_name: String,
    pub request_type: String,
    pub invitation_id: String,
    pub other_child_name: Option<String>,
    pub other_parent_name: Option<String>,
    pub other_parent_email: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

pub(crate) const APPROVAL_REQUEST_COLUMNS: &str = "id, parent_id, child_id, child_name, \
    request_type, invitation_id, other_child_name, other_parent_name, other_parent_email, \
    message, status, created_at, responded_at, expires_at";

//! Invitation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for invitations table
#[derive(Debug, Clone, FromRow)]
pub struct InvitationModel {
    pub id: String,
    pub sender_child_id: String,
    pub sender_child_name: String,
    pub sender_parent_id: String,
    pub sender_parent_name: String,
    pub sender_parent_email: String,
    pub recipient_email: String,
    pub recipient_phone: Option<String>,
    pub recipient_child_id: Option<String>,
    pub recipient_child_name: Option<String>,
    pub recipient_parent_id: Option<String>,
    pub recipient_parent_name: Option<String>,
    pub status: String,
    pub message: Option<String>,
    pub sender_parent_approved: bool,
    pub sender_parent_approved_at: Option<DateTime<Utc>>,
    pub recipient_parent_approved: bool,
    pub recipient_parent_approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

/// Column list shared by every invitation query
pub(crate) const INVITATION_COLUMNS: &str = "id, sender_child_id, sender_child_name, \
    sender_parent_id, sender_parent_name, sender_parent_email, recipient_email, \
    recipient_phone, recipient_child_id, recipient_child_name, recipient_parent_id, \
    recipient_parent_name, status, message, sender_parent_approved, \
    sender_parent_approved_at, recipient_parent_approved, recipient_parent_approved_at, \
    created_at, updated_at, expires_at, responded_at";

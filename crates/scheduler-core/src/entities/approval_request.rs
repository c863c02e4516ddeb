//! Approval request entity - a parent-facing decision derived from an invitation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::invitation::Invitation;
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Which side of the invitation the deciding parent is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalRequestType {
    /// The parent's own child sent the invitation
    Outgoing,
    /// The parent's child accepted someone else's invitation
    Incoming,
}

impl ApprovalRequestType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Incoming => "incoming",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "outgoing" => Some(Self::Outgoing),
            "incoming" => Some(Self::Incoming),
            _ => None,
        }
    }
}

impl fmt::Display for ApprovalRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Denied,
    Expired,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "denied" => Some(Self::Denied),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval request entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub id: RecordId,
    pub parent_id: RecordId,
    pub child_id: RecordId,
    pub child_name: String,
    pub request_type: ApprovalRequestType,
    pub invitation_id: RecordId,
    /// Unknown for outgoing requests until the recipient accepts
    pub other_child_name: Option<String>,
    pub other_parent_name: Option<String>,
    pub other_parent_email: Option<String>,
    pub message: Option<String>,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl ApprovalRequest {
    /// Request for the sender's parent, created with the invitation
    pub fn outgoing(id: RecordId, invitation: &Invitation, now: DateTime<Utc>) -> Self {
        let sender = &invitation.sender;
        Self {
            id,
            parent_id: sender.parent_id.clone(),
            child_id: sender.child_id.clone(),
            child_name: sender.child_name.clone(),
            request_type: ApprovalRequestType::Outgoing,
            invitation_id: invitation.id.clone(),
            other_child_name: None,
            other_parent_name: None,
            other_parent_email: Some(invitation.recipient_email.to_string()),
            message: invitation.message.clone(),
            status: ApprovalStatus::Pending,
            created_at: now,
            responded_at: None,
            expires_at: invitation.expires_at,
        }
    }

    /// Request for the recipient's parent, created when the recipient accepts
    pub fn incoming(
        id: RecordId,
        invitation: &Invitation,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let recipient = invitation
            .recipient
            .as_ref()
            .ok_or(DomainError::MissingRecipientInfo)?;
        let sender = &invitation.sender;

        Ok(Self {
            id,
            parent_id: recipient.parent_id.clone(),
            child_id: recipient.child_id.clone(),
            child_name: recipient.child_name.clone(),
            request_type: ApprovalRequestType::Incoming,
            invitation_id: invitation.id.clone(),
            other_child_name: Some(sender.child_name.clone()),
            other_parent_name: Some(sender.parent_name.clone()),
            other_parent_email: Some(sender.parent_email.clone()),
            message: invitation.message.clone(),
            status: ApprovalStatus::Pending,
            created_at: now,
            responded_at: None,
            expires_at: invitation.expires_at,
        })
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }

    /// Pending and still inside its deadline
    pub fn is_actionable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && self.expires_at > now
    }

    /// Record the parent's decision. A request is answered exactly once.
    pub fn respond(&mut self, approved: bool, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::ApprovalRequestNotPending);
        }
        if self.expires_at <= now {
            return Err(DomainError::ApprovalRequestExpired);
        }

        self.status = if approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Denied
        };
        self.responded_at = Some(now);
        Ok(())
    }

    /// Sweeper transition. Returns whether anything changed.
    pub fn expire_if_stale(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_pending() && self.expires_at < now {
            self.status = ApprovalStatus::Expired;
            return true;
        }
        false
    }
}

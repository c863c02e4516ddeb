//! Delivery log entity - audit trail of notification attempts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryKind {
    FriendInvitationEmail,
    ParentApprovalPush,
    FriendshipApprovedPush,
}

impl DeliveryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FriendInvitationEmail => "friendInvitationEmail",
            Self::ParentApprovalPush => "parentApprovalPush",
            Self::FriendshipApprovedPush => "friendshipApprovedPush",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "friendInvitationEmail" => Some(Self::FriendInvitationEmail),
            "parentApprovalPush" => Some(Self::ParentApprovalPush),
            "friendshipApprovedPush" => Some(Self::FriendshipApprovedPush),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(Self::Sent),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// One notification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryLog {
    pub id: RecordId,
    pub kind: DeliveryKind,
    /// Email address or parent id the notification was addressed to
    pub recipient: String,
    /// Invitation or approval request the notification is about
    pub reference_id: RecordId,
    pub status: DeliveryStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DeliveryLog {
    pub fn sent(
        kind: DeliveryKind,
        recipient: String,
        reference_id: RecordId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            kind,
            recipient,
            reference_id,
            status: DeliveryStatus::Sent,
            error: None,
            created_at: now,
        }
    }

    pub fn failed(
        kind: DeliveryKind,
        recipient: String,
        reference_id: RecordId,
        error: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            status: DeliveryStatus::Failed,
            error: Some(error),
            ..Self::sent(kind, recipient, reference_id, now)
        }
    }
}

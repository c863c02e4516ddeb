//! Invitation entity - one child's request to befriend another
//!
//! Status transitions:
//!
//! ```text
//! pendingSenderApproval    --sender parent approves-->   pendingRecipient
//!                          --sender parent denies-->     deniedBySenderParent
//! pendingRecipient         --recipient child accepts-->  pendingRecipientApproval
//!                          --recipient child declines--> declined
//! pendingRecipientApproval --recipient parent approves--> accepted
//!                          --recipient parent denies-->  deniedByRecipientParent
//! any pending state        --sweeper-->                  expired
//!                          --sender parent cancels-->    cancelled
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{EmailAddress, RecordId};

/// Longest note a child may attach to an invitation, in characters
pub const MAX_MESSAGE_LEN: usize = 500;

/// Default invitation lifetime
pub const DEFAULT_INVITATION_TTL_DAYS: i64 = 30;

/// Invitation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvitationStatus {
    PendingSenderApproval,
    PendingRecipient,
    PendingRecipientApproval,
    Accepted,
    Declined,
    DeniedBySenderParent,
    DeniedByRecipientParent,
    Expired,
    Cancelled,
}

impl InvitationStatus {
    /// The non-terminal states
    pub const PENDING: [InvitationStatus; 3] = [
        Self::PendingSenderApproval,
        Self::PendingRecipient,
        Self::PendingRecipientApproval,
    ];

    /// Wire and storage name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingSenderApproval => "pendingSenderApproval",
            Self::PendingRecipient => "pendingRecipient",
            Self::PendingRecipientApproval => "pendingRecipientApproval",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::DeniedBySenderParent => "deniedBySenderParent",
            Self::DeniedByRecipientParent => "deniedByRecipientParent",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let status = match s {
            "pendingSenderApproval" => Self::PendingSenderApproval,
            "pendingRecipient" => Self::PendingRecipient,
            "pendingRecipientApproval" => Self::PendingRecipientApproval,
            "accepted" => Self::Accepted,
            "declined" => Self::Declined,
            "deniedBySenderParent" => Self::DeniedBySenderParent,
            "deniedByRecipientParent" => Self::DeniedByRecipientParent,
            "expired" => Self::Expired,
            "cancelled" => Self::Cancelled,
            _ => return None,
        };
        Some(status)
    }

    #[inline]
    pub fn is_pending(self) -> bool {
        Self::PENDING.contains(&self)
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The child starting an invitation, with their parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderInfo {
    pub child_id: RecordId,
    pub child_name: String,
    pub parent_id: RecordId,
    pub parent_name: String,
    pub parent_email: String,
}

/// The child accepting an invitation, with their parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientInfo {
    pub child_id: RecordId,
    pub child_name: String,
    pub parent_id: RecordId,
    pub parent_name: String,
}

/// Invitation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: RecordId,
    pub sender: SenderInfo,
    pub recipient_email: EmailAddress,
    pub recipient_phone: Option<String>,
    /// Attached only by the recipient child accepting
    pub recipient: Option<RecipientInfo>,
    pub status: InvitationStatus,
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

impl Invitation {
    /// Create a new invitation awaiting the sender parent's decision
    pub fn new(
        id: RecordId,
        sender: SenderInfo,
        recipient_email: EmailAddress,
        recipient_phone: Option<String>,
        message: Option<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, DomainError> {
        let message = normalize_message(message)?;
        let recipient_phone = recipient_phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            id,
            sender,
            recipient_email,
            recipient_phone,
            recipient: None,
            status: InvitationStatus::PendingSenderApproval,
            message,
            sender_parent_approved: false,
            sender_parent_approved_at: None,
            recipient_parent_approved: false,
            recipient_parent_approved_at: None,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
            responded_at: None,
        })
    }

    /// Whether the invitation's deadline has passed at `now`
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Fail unless the deadline is still ahead of `now`
    pub fn ensure_not_expired(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_expired_at(now) {
            return Err(DomainError::InvitationExpired);
        }
        Ok(())
    }

    fn require_status(&self, expected: InvitationStatus) -> Result<(), DomainError> {
        if self.status == expected {
            Ok(())
        } else if self.status.is_terminal() {
            Err(DomainError::InvitationClosed(self.status))
        } else {
            Err(DomainError::InvalidInvitationState {
                expected,
                actual: self.status,
            })
        }
    }

    /// Sender parent approves: the invitation goes out to the recipient
    pub fn approve_by_sender_parent(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.require_status(InvitationStatus::PendingSenderApproval)?;
        self.sender_parent_approved = true;
        self.sender_parent_approved_at = Some(now);
        self.status = InvitationStatus::PendingRecipient;
        self.updated_at = now;
        Ok(())
    }

    pub fn deny_by_sender_parent(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.require_status(InvitationStatus::PendingSenderApproval)?;
        self.status = InvitationStatus::DeniedBySenderParent;
        self.updated_at = now;
        Ok(())
    }

    /// Recipient child accepts; requires an unexpired `pendingRecipient` invitation
    pub fn attach_recipient(
        &mut self,
        recipient: RecipientInfo,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.require_status(InvitationStatus::PendingRecipient)?;
        self.ensure_not_expired(now)?;
        if recipient.child_id == self.sender.child_id {
            return Err(DomainError::ValidationError(
                "a child cannot befriend themselves".to_string(),
            ));
        }

        self.recipient = Some(recipient);
        self.status = InvitationStatus::PendingRecipientApproval;
        self.responded_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Recipient child turns the invitation down
    pub fn decline(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.require_status(InvitationStatus::PendingRecipient)?;
        self.ensure_not_expired(now)?;
        self.status = InvitationStatus::Declined;
        self.responded_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Recipient parent approves. Returns `true` when both parents have now
    /// approved and the invitation is `accepted`.
    pub fn approve_by_recipient_parent(&mut self, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.require_status(InvitationStatus::PendingRecipientApproval)?;
        if self.recipient.is_none() {
            return Err(DomainError::MissingRecipientInfo);
        }

        self.recipient_parent_approved = true;
        self.recipient_parent_approved_at = Some(now);
        self.updated_at = now;

        if self.sender_parent_approved {
            self.status = InvitationStatus::Accepted;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn deny_by_recipient_parent(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.require_status(InvitationStatus::PendingRecipientApproval)?;
        self.status = InvitationStatus::DeniedByRecipientParent;
        self.updated_at = now;
        Ok(())
    }

    /// Withdraw a pending invitation
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::InvitationClosed(self.status));
        }
        self.status = InvitationStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    /// Sweeper transition. Returns whether anything changed.
    pub fn expire_if_stale(&mut self, now: DateTime<Utc>) -> bool {
        if self.status.is_pending() && self.expires_at < now {
            self.status = InvitationStatus::Expired;
            self.updated_at = now;
            return true;
        }
        false
    }

    /// Still worth showing in the sender's "sent" list
    pub fn is_open_for_sender(&self, now: DateTime<Utc>) -> bool {
        !matches!(
            self.status,
            InvitationStatus::Accepted | InvitationStatus::Declined
        ) && !self.is_expired_at(now)
    }

    /// Waiting for a child at `recipient_email` to accept
    pub fn is_awaiting_recipient(&self, now: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::PendingRecipient && !self.is_expired_at(now)
    }

    /// Whether `status` agrees with the approval flags and recipient attachment
    pub fn is_consistent(&self) -> bool {
        let sender = self.sender_parent_approved;
        let recipient_approved = self.recipient_parent_approved;
        let attached = self.recipient.is_some();

        match self.status {
            InvitationStatus::PendingSenderApproval | InvitationStatus::DeniedBySenderParent => {
                !sender && !recipient_approved && !attached
            }
            InvitationStatus::PendingRecipient | InvitationStatus::Declined => {
                sender && !recipient_approved && !attached
            }
            InvitationStatus::PendingRecipientApproval
            | InvitationStatus::DeniedByRecipientParent => {
                sender && !recipient_approved && attached
            }
            InvitationStatus::Accepted => sender && recipient_approved && attached,
            InvitationStatus::Expired | InvitationStatus::Cancelled => {
                !(sender && recipient_approved) && (attached || !recipient_approved)
            }
        }
    }
}

fn normalize_message(message: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(message) = message else {
        return Ok(None);
    };
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(DomainError::ContentTooLong {
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordId {
        RecordId::parse(s).unwrap()
    }

    fn sender() -> SenderInfo {
        SenderInfo {
            child_id: id("childA"),
            child_name: "Alex".to_string(),
            parent_id: id("parentA"),
            parent_name: "Pat".to_string(),
            parent_email: "pat@example.com".to_string(),
        }
    }

    fn recipient() -> RecipientInfo {
        RecipientInfo {
            child_id: id("childB"),
            child_name: "Blair".to_string(),
            parent_id: id("parentB"),
            parent_name: "Robin".to_string(),
        }
    }

    fn invitation(now: DateTime<Utc>) -> Invitation {
        Invitation::new(
            id("inv1"),
            sender(),
            EmailAddress::parse("b-parent@example.com").unwrap(),
            None,
            Some("Hi!".to_string()),
            now,
            Duration::days(DEFAULT_INVITATION_TTL_DAYS),
        )
        .unwrap()
    }

    #[test]
    fn test_new_invitation() {
        let now = Utc::now();
        let inv = invitation(now);

        assert_eq!(inv.status, InvitationStatus::PendingSenderApproval);
        assert_eq!(inv.expires_at, now + Duration::days(30));
        assert_eq!(inv.message.as_deref(), Some("Hi!"));
        assert!(inv.is_consistent());
    }

    #[test]
    fn test_message_limits() {
        let now = Utc::now();
        let email = EmailAddress::parse("x@example.com").unwrap();
        let ttl = Duration::days(1);

        let blank = Invitation::new(
            id("i"),
            sender(),
            email.clone(),
            None,
            Some("   ".into()),
            now,
            ttl,
        )
        .unwrap();
        assert_eq!(blank.message, None);

        let max = "é".repeat(MAX_MESSAGE_LEN);
        assert!(Invitation::new(id("i"), sender(), email.clone(), None, Some(max), now, ttl).is_ok());

        let over = "a".repeat(MAX_MESSAGE_LEN + 1);
        let err = Invitation::new(id("i"), sender(), email, None, Some(over), now, ttl).unwrap_err();
        assert!(matches!(err, DomainError::ContentTooLong { max: 500 }));
    }

    #[test]
    fn test_full_acceptance_path() {
        let now = Utc::now();
        let mut inv = invitation(now);

        inv.approve_by_sender_parent(now).unwrap();
        assert_eq!(inv.status, InvitationStatus::PendingRecipient);
        assert!(inv.is_consistent());

        inv.attach_recipient(recipient(), now).unwrap();
        assert_eq!(inv.status, InvitationStatus::PendingRecipientApproval);
        assert_eq!(inv.responded_at, Some(now));
        assert!(inv.is_consistent());

        assert!(inv.approve_by_recipient_parent(now).unwrap());
        assert_eq!(inv.status, InvitationStatus::Accepted);
        assert!(inv.is_consistent());
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let now = Utc::now();
        let mut inv = invitation(now);
        inv.deny_by_sender_parent(now).unwrap();

        let err = inv.attach_recipient(recipient(), now).unwrap_err();
        assert!(err.is_invalid_state());
        assert!(inv.approve_by_sender_parent(now).unwrap_err().is_invalid_state());
        assert!(inv.cancel(now).unwrap_err().is_invalid_state());
        assert_eq!(inv.status, InvitationStatus::DeniedBySenderParent);
    }

    #[test]
    fn test_attach_recipient_checks_expiry_at_call_time() {
        let now = Utc::now();
        let mut inv = invitation(now);
        inv.approve_by_sender_parent(now).unwrap();

        let err = inv.attach_recipient(recipient(), inv.expires_at).unwrap_err();
        assert!(matches!(err, DomainError::InvitationExpired));
        assert_eq!(inv.status, InvitationStatus::PendingRecipient);
    }

    #[test]
    fn test_attach_recipient_rejects_self_invite() {
        let now = Utc::now();
        let mut inv = invitation(now);
        inv.approve_by_sender_parent(now).unwrap();

        let mut me = recipient();
        me.child_id = inv.sender.child_id.clone();
        assert!(inv.attach_recipient(me, now).unwrap_err().is_validation());
    }

    #[test]
    fn test_expire_if_stale_is_strict() {
        let now = Utc::now();
        let mut inv = invitation(now);

        assert!(!inv.expire_if_stale(inv.expires_at));
        assert!(inv.expire_if_stale(inv.expires_at + Duration::seconds(1)));
        assert_eq!(inv.status, InvitationStatus::Expired);
        assert!(!inv.expire_if_stale(inv.expires_at + Duration::days(1)));
    }

    #[test]
    fn test_status_names_roundtrip() {
        for status in [
            InvitationStatus::PendingSenderApproval,
            InvitationStatus::PendingRecipient,
            InvitationStatus::PendingRecipientApproval,
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
            InvitationStatus::DeniedBySenderParent,
            InvitationStatus::DeniedByRecipientParent,
            InvitationStatus::Expired,
            InvitationStatus::Cancelled,
        ] {
            assert_eq!(InvitationStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(InvitationStatus::parse("pending"), None);
    }
}

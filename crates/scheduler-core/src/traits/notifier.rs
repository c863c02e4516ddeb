//! Notifier port - hands notification payloads to a delivery channel
//!
//! Delivery itself (push gateway, mail relay) happens outside this system.
//! Errors come back as [`DomainError::DeliveryFailed`]; callers treat them as
//! non-fatal.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::notifications::{ApprovalNotice, FriendshipNotice, InvitationEmail};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell a parent an approval request is waiting for them
    async fn notify_approval_needed(&self, notice: &ApprovalNotice) -> Result<(), DomainError>;

    /// Send the invitation email to the recipient's parent
    async fn notify_email_invitation(&self, email: &InvitationEmail) -> Result<(), DomainError>;

    /// Tell a parent their child has a new friend
    async fn notify_friendship_approved(
        &self,
        notice: &FriendshipNotice,
    ) -> Result<(), DomainError>;
}

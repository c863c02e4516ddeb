//! Logging notifier
//!
//! Writes payloads to the trace log instead of handing them to a delivery
//! channel. Used for local runs without Redis.

use async_trait::async_trait;
use scheduler_core::error::DomainError;
use scheduler_core::notifications::{ApprovalNotice, FriendshipNotice, InvitationEmail};
use scheduler_core::traits::Notifier;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_approval_needed(&self, notice: &ApprovalNotice) -> Result<(), DomainError> {
        let push = notice.to_push();
        info!(
            parent_id = %notice.parent_id,
            request_id = %notice.request_id,
            title = %push.title,
            body = %push.body,
            badge = notice.badge,
            "Approval push"
        );
        Ok(())
    }

    async fn notify_email_invitation(&self, email: &InvitationEmail) -> Result<(), DomainError> {
        info!(
            invitation_id = %email.invitation_id,
            to = %email.to,
            subject = %email.subject,
            deep_link = %email.deep_link,
            "Invitation email"
        );
        Ok(())
    }

    async fn notify_friendship_approved(
        &self,
        notice: &FriendshipNotice,
    ) -> Result<(), DomainError> {
        let push = notice.to_push();
        info!(
            parent_id = %notice.parent_id,
            friendship_id = %notice.friendship_id,
            title = %push.title,
            body = %push.body,
            "Friendship push"
        );
        Ok(())
    }
}

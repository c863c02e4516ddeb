//! Invitation service
//!
//! Creating, accepting, declining and cancelling friend invitations, plus
//! the sender-side and recipient-side listings.

use scheduler_core::entities::{ApprovalRequest, Invitation, RecipientInfo, SenderInfo};
use scheduler_core::error::DomainError;
use scheduler_core::value_objects::{EmailAddress, RecordId};
use tracing::{info, instrument};

use super::approval::ApprovalService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::hooks::NotificationHooks;

/// Invitation service
pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvitationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start an invitation. The sender's parent gets an outgoing approval
    /// request before anything is sent to the recipient.
    #[instrument(skip(self, sender, recipient_phone, message), fields(sender_child_id = %sender.child_id))]
    pub async fn create_invitation(
        &self,
        sender: SenderInfo,
        recipient_email: &str,
        recipient_phone: Option<String>,
        message: Option<String>,
    ) -> ServiceResult<Invitation> {
        let recipient_email = EmailAddress::parse(recipient_email)?;
        let now = self.ctx.now();

        let invitation = Invitation::new(
            RecordId::generate(),
            sender,
            recipient_email,
            recipient_phone,
            message,
            now,
            self.ctx.invitation_ttl(),
        )?;
        self.ctx.invitation_repo().create(&invitation).await?;

        let request = ApprovalRequest::outgoing(RecordId::generate(), &invitation, now);
        self.ctx.approval_request_repo().create(&request).await?;

        info!(
            invitation_id = %invitation.id,
            request_id = %request.id,
            parent_id = %request.parent_id,
            expires_at = %invitation.expires_at,
            "Invitation created, awaiting sender parent approval"
        );

        let badge = ApprovalService::new(self.ctx)
            .badge_after_commit(&request.parent_id)
            .await;
        NotificationHooks::new(self.ctx)
            .approval_needed(&request, badge)
            .await;

        Ok(invitation)
    }

    /// Recipient child accepts; the recipient's parent gets an incoming
    /// approval request
    #[instrument(skip(self, recipient), fields(recipient_child_id = %recipient.child_id))]
    pub async fn accept_as_recipient(
        &self,
        invitation_id: &RecordId,
        recipient: RecipientInfo,
    ) -> ServiceResult<Invitation> {
        let mut invitation = self.load(invitation_id).await?;
        let now = self.ctx.now();

        let recipient_child_id = recipient.child_id.clone();
        invitation.attach_recipient(recipient, now)?;

        if self
            .ctx
            .friendship_repo()
            .find_between(&invitation.sender.child_id, &recipient_child_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyFriends.into());
        }

        let request = ApprovalRequest::incoming(RecordId::generate(), &invitation, now)?;
        self.ctx.invitation_repo().update(&invitation).await?;
        self.ctx.approval_request_repo().create(&request).await?;

        info!(
            invitation_id = %invitation.id,
            request_id = %request.id,
            parent_id = %request.parent_id,
            "Invitation accepted by recipient, awaiting recipient parent approval"
        );

        let badge = ApprovalService::new(self.ctx)
            .badge_after_commit(&request.parent_id)
            .await;
        NotificationHooks::new(self.ctx)
            .approval_needed(&request, badge)
            .await;

        Ok(invitation)
    }

    /// Recipient child says no
    #[instrument(skip(self))]
    pub async fn decline_as_recipient(&self, invitation_id: &RecordId) -> ServiceResult<Invitation> {
        let mut invitation = self.load(invitation_id).await?;
        invitation.decline(self.ctx.now())?;
        self.ctx.invitation_repo().update(&invitation).await?;

        info!(invitation_id = %invitation.id, "Invitation declined by recipient");
        Ok(invitation)
    }

    /// Sender's parent withdraws a pending invitation. Approval requests
    /// already issued stay as they are; answering one fails on the
    /// invitation's state.
    #[instrument(skip(self))]
    pub async fn cancel_invitation(
        &self,
        invitation_id: &RecordId,
        parent_id: &RecordId,
    ) -> ServiceResult<Invitation> {
        let mut invitation = self.load(invitation_id).await?;
        if &invitation.sender.parent_id != parent_id {
            return Err(DomainError::NotInvitationSender.into());
        }

        invitation.cancel(self.ctx.now())?;
        self.ctx.invitation_repo().update(&invitation).await?;

        info!(invitation_id = %invitation.id, "Invitation cancelled by sender parent");
        Ok(invitation)
    }

    #[instrument(skip(self))]
    pub async fn get_invitation(&self, invitation_id: &RecordId) -> ServiceResult<Invitation> {
        self.load(invitation_id).await
    }

    /// Invitations a child sent that are still in play, newest first
    #[instrument(skip(self))]
    pub async fn fetch_sent_invitations(&self, child_id: &RecordId) -> ServiceResult<Vec<Invitation>> {
        let now = self.ctx.now();
        let mut invitations: Vec<Invitation> = self
            .ctx
            .invitation_repo()
            .find_by_sender_child(child_id)
            .await?
            .into_iter()
            .filter(|i| i.is_open_for_sender(now))
            .collect();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }

    /// Invitations waiting for a child at this address, newest first
    #[instrument(skip(self))]
    pub async fn fetch_pending_invitations_by_email(
        &self,
        email: &str,
    ) -> ServiceResult<Vec<Invitation>> {
        let email = EmailAddress::parse(email)?;
        let now = self.ctx.now();
        let mut invitations: Vec<Invitation> = self
            .ctx
            .invitation_repo()
            .find_by_recipient_email(&email)
            .await?
            .into_iter()
            .filter(|i| i.is_awaiting_recipient(now))
            .collect();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }

    async fn load(&self, invitation_id: &RecordId) -> ServiceResult<Invitation> {
        self.ctx
            .invitation_repo()
            .find_by_id(invitation_id)
            .await?
            .ok_or_else(|| DomainError::InvitationNotFound(invitation_id.clone()).into())
    }
}

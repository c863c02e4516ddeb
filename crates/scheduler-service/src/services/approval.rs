//! Approval service
//!
//! Parents answer approval requests here. The answer drives the
//! invitation's state machine and, when both parents have approved,
//! materializes the friendship.

use scheduler_core::entities::{
    ApprovalRequest, ApprovalRequestType, Friendship, Invitation,
};
use scheduler_core::error::DomainError;
use scheduler_core::value_objects::RecordId;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::hooks::NotificationHooks;

/// Everything a response changed
#[derive(Debug, Clone)]
pub struct RespondOutcome {
    pub request: ApprovalRequest,
    pub invitation: Invitation,
    /// Set when this response completed the invitation
    pub friendship: Option<Friendship>,
}

/// Approval service
pub struct ApprovalService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApprovalService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Approve or deny a request on behalf of `parent_id`
    #[instrument(skip(self))]
    pub async fn respond_to_approval_request(
        &self,
        request_id: &RecordId,
        parent_id: &RecordId,
        approved: bool,
    ) -> ServiceResult<RespondOutcome> {
        let mut request = self
            .ctx
            .approval_request_repo()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| DomainError::ApprovalRequestNotFound(request_id.clone()))?;
        let mut invitation = self
            .ctx
            .invitation_repo()
            .find_by_id(&request.invitation_id)
            .await?
            .ok_or_else(|| DomainError::InvitationNotFound(request.invitation_id.clone()))?;

        if &request.parent_id != parent_id {
            return Err(DomainError::NotRequestParent.into());
        }

        let now = self.ctx.now();
        request.respond(approved, now)?;

        let accepted = match (request.request_type, approved) {
            (ApprovalRequestType::Outgoing, true) => {
                invitation.approve_by_sender_parent(now)?;
                false
            }
            (ApprovalRequestType::Outgoing, false) => {
                invitation.deny_by_sender_parent(now)?;
                false
            }
            (ApprovalRequestType::Incoming, true) => invitation.approve_by_recipient_parent(now)?,
            (ApprovalRequestType::Incoming, false) => {
                invitation.deny_by_recipient_parent(now)?;
                false
            }
        };

        // Friendship, then invitation, then request. A failure before the
        // request write leaves it pending and a retry picks up the
        // friendship already written. The store has no transactions: if only
        // the request write fails, the request stays pending against an
        // invitation that has moved on and cannot be answered again.
        let friendship = if accepted {
            let (friendship, is_new) = self.friendship_for(&invitation).await?;
            if is_new {
                self.ctx.friendship_repo().create(&friendship).await?;
            }
            Some(friendship)
        } else {
            None
        };
        self.ctx.invitation_repo().update(&invitation).await?;
        self.ctx.approval_request_repo().update(&request).await?;

        info!(
            request_id = %request.id,
            request_type = %request.request_type,
            approved,
            invitation_id = %invitation.id,
            invitation_status = %invitation.status,
            friendship_id = ?friendship.as_ref().map(|f| f.id.as_str()),
            "Approval request answered"
        );

        self.badge_after_commit(&request.parent_id).await;

        let hooks = NotificationHooks::new(self.ctx);
        if request.request_type == ApprovalRequestType::Outgoing && approved {
            hooks.invitation_email(&invitation).await;
        }
        if let Some(friendship) = &friendship {
            hooks.friendship_approved(friendship).await;
        }

        Ok(RespondOutcome {
            request,
            invitation,
            friendship,
        })
    }

    /// Requests still waiting for this parent, newest first
    #[instrument(skip(self))]
    pub async fn fetch_pending_approval_requests(
        &self,
        parent_id: &RecordId,
    ) -> ServiceResult<Vec<ApprovalRequest>> {
        let now = self.ctx.now();
        let mut requests: Vec<ApprovalRequest> = self
            .ctx
            .approval_request_repo()
            .find_by_parent(parent_id)
            .await?
            .into_iter()
            .filter(|r| r.is_actionable_at(now))
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Recount pending requests and store the badge on the parent record.
    /// Parents without a profile just get the count back.
    #[instrument(skip(self))]
    pub async fn refresh_badge_count(&self, parent_id: &RecordId) -> ServiceResult<i64> {
        let count = self
            .ctx
            .approval_request_repo()
            .count_pending_for_parent(parent_id)
            .await?;

        match self
            .ctx
            .parent_repo()
            .set_pending_approval_count(parent_id, count)
            .await
        {
            Ok(()) => {}
            Err(DomainError::ParentNotFound(_)) => {
                debug!(parent_id = %parent_id, "No parent profile, badge not stored");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(count)
    }

    /// Badge to push after a change that is already stored. A failed
    /// refresh is logged and the last stored count is used.
    pub(crate) async fn badge_after_commit(&self, parent_id: &RecordId) -> i64 {
        match self.refresh_badge_count(parent_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!(parent_id = %parent_id, error = %e, "Failed to refresh badge count");
                self.ctx
                    .parent_repo()
                    .find_by_id(parent_id)
                    .await
                    .ok()
                    .flatten()
                    .map_or(0, |parent| parent.pending_approval_count)
            }
        }
    }

    /// Friendship completing `invitation`, and whether it still has to be
    /// stored. One left behind by an interrupted response is reused.
    async fn friendship_for(&self, invitation: &Invitation) -> ServiceResult<(Friendship, bool)> {
        let friendship = Friendship::from_invitation(RecordId::generate(), invitation, self.ctx.now())?;
        match self
            .ctx
            .friendship_repo()
            .find_between(&friendship.child1_id, &friendship.child2_id)
            .await?
        {
            Some(existing) if existing.invitation_id == invitation.id => Ok((existing, false)),
            Some(_) => Err(DomainError::AlreadyFriends.into()),
            None => Ok((friendship, true)),
        }
    }
}

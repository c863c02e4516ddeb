//! Post-commit notification hooks
//!
//! Called after a state change has been written. Delivery problems are
//! logged and recorded as failed [`DeliveryLog`]s, never returned: a
//! transition that committed stays committed.

use scheduler_core::entities::{ApprovalRequest, DeliveryKind, DeliveryLog, Friendship, Invitation};
use scheduler_core::error::DomainError;
use scheduler_core::notifications::{ApprovalNotice, FriendshipNotice, InvitationEmail};
use scheduler_core::value_objects::RecordId;
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;

pub struct NotificationHooks<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationHooks<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Push "approval needed" to the request's parent
    #[instrument(skip(self, request), fields(request_id = %request.id, parent_id = %request.parent_id))]
    pub async fn approval_needed(&self, request: &ApprovalRequest, badge: i64) {
        let Some(device_token) = self.device_token(&request.parent_id).await else {
            return;
        };

        let notice = ApprovalNotice {
            parent_id: request.parent_id.clone(),
            device_token: Some(device_token),
            request_id: request.id.clone(),
            request_type: request.request_type,
            child_name: request.child_name.clone(),
            other_child_name: request.other_child_name.clone(),
            badge,
        };

        let result = self.ctx.notifier().notify_approval_needed(&notice).await;
        self.record(
            DeliveryKind::ParentApprovalPush,
            request.parent_id.to_string(),
            &request.id,
            result,
        )
        .await;
    }

    /// Email the invitation to the recipient's parent
    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    pub async fn invitation_email(&self, invitation: &Invitation) {
        let email = InvitationEmail::render(invitation, self.ctx.settings());
        let result = self.ctx.notifier().notify_email_invitation(&email).await;
        self.record(
            DeliveryKind::FriendInvitationEmail,
            email.to.clone(),
            &invitation.id,
            result,
        )
        .await;
    }

    /// Tell both parents their children are now friends
    #[instrument(skip(self, friendship), fields(friendship_id = %friendship.id))]
    pub async fn friendship_approved(&self, friendship: &Friendship) {
        let sides = [
            (
                &friendship.parent1_id,
                &friendship.child1_id,
                &friendship.child2_name,
            ),
            (
                &friendship.parent2_id,
                &friendship.child2_id,
                &friendship.child1_name,
            ),
        ];

        for (parent_id, child_id, friend_name) in sides {
            let Some(device_token) = self.device_token(parent_id).await else {
                continue;
            };

            let notice = FriendshipNotice {
                parent_id: parent_id.clone(),
                device_token: Some(device_token),
                child_id: child_id.clone(),
                friend_name: friend_name.clone(),
                invitation_id: friendship.invitation_id.clone(),
                friendship_id: friendship.id.clone(),
            };

            let result = self.ctx.notifier().notify_friendship_approved(&notice).await;
            self.record(
                DeliveryKind::FriendshipApprovedPush,
                parent_id.to_string(),
                &friendship.invitation_id,
                result,
            )
            .await;
        }
    }

    /// Registered push token of a parent. Parents without a profile or a
    /// token get no push.
    async fn device_token(&self, parent_id: &RecordId) -> Option<String> {
        match self.ctx.parent_repo().find_by_id(parent_id).await {
            Ok(Some(parent)) => {
                if parent.device_token.is_none() {
                    debug!(parent_id = %parent_id, "No device token, skipping push");
                }
                parent.device_token
            }
            Ok(None) => {
                debug!(parent_id = %parent_id, "No parent profile, skipping push");
                None
            }
            Err(e) => {
                warn!(parent_id = %parent_id, error = %e, "Failed to load parent for push");
                None
            }
        }
    }

    async fn record(
        &self,
        kind: DeliveryKind,
        recipient: String,
        reference_id: &RecordId,
        result: Result<(), DomainError>,
    ) {
        let now = self.ctx.now();
        let log = match result {
            Ok(()) => {
                debug!(kind = kind.as_str(), recipient = %recipient, "Notification handed off");
                DeliveryLog::sent(kind, recipient, reference_id.clone(), now)
            }
            Err(e) => {
                warn!(kind = kind.as_str(), recipient = %recipient, error = %e, "Notification delivery failed");
                DeliveryLog::failed(kind, recipient, reference_id.clone(), e.to_string(), now)
            }
        };

        if let Err(e) = self.ctx.delivery_log_repo().create(&log).await {
            warn!(error = %e, "Failed to record delivery log");
        }
    }
}

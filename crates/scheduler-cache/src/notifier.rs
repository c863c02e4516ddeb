//! Redis-backed notifier
//!
//! Publishes push payloads to the parent's channel and invitation emails to
//! the email outbox. A delivery worker subscribed to those channels talks to
//! the push gateway and the mail relay.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use scheduler_core::error::DomainError;
use scheduler_core::notifications::{ApprovalNotice, FriendshipNotice, InvitationEmail};
use scheduler_core::traits::Notifier;

use crate::pool::{RedisPool, RedisPoolError};
use crate::pubsub::{NotificationChannel, OutboundEvent, Publisher};

pub const PARENT_APPROVAL_EVENT: &str = "PARENT_APPROVAL";
pub const FRIENDSHIP_APPROVED_EVENT: &str = "FRIENDSHIP_APPROVED";
pub const INVITATION_EMAIL_EVENT: &str = "FRIEND_INVITATION_EMAIL";

fn delivery_error(err: RedisPoolError) -> DomainError {
    DomainError::DeliveryFailed(err.to_string())
}

/// [`Notifier`] that hands payloads to Redis Pub/Sub
#[derive(Clone, Debug)]
pub struct RedisNotifier {
    publisher: Publisher,
}

impl RedisNotifier {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            publisher: Publisher::new(pool),
        }
    }

    async fn send<T: Serialize + Sync>(
        &self,
        channel: NotificationChannel,
        event_type: &str,
        payload: &T,
    ) -> Result<(), DomainError> {
        let event = OutboundEvent::new(event_type, payload, Utc::now())
            .map_err(|e| delivery_error(e.into()))?;
        let receivers = self
            .publisher
            .publish(&channel, &event)
            .await
            .map_err(delivery_error)?;

        if receivers == 0 {
            tracing::debug!(channel = %channel, event_type, "No subscriber on channel");
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for RedisNotifier {
    #[instrument(skip(self, notice), fields(parent_id = %notice.parent_id, request_id = %notice.request_id))]
    async fn notify_approval_needed(&self, notice: &ApprovalNotice) -> Result<(), DomainError> {
        self.send(
            NotificationChannel::parent(notice.parent_id.clone()),
            PARENT_APPROVAL_EVENT,
            &notice.to_push(),
        )
        .await
    }

    #[instrument(skip(self, email), fields(invitation_id = %email.invitation_id))]
    async fn notify_email_invitation(&self, email: &InvitationEmail) -> Result<(), DomainError> {
        self.send(
            NotificationChannel::email_outbox(),
            INVITATION_EMAIL_EVENT,
            email,
        )
        .await
    }

    #[instrument(skip(self, notice), fields(parent_id = %notice.parent_id, friendship_id = %notice.friendship_id))]
    async fn notify_friendship_approved(
        &self,
        notice: &FriendshipNotice,
    ) -> Result<(), DomainError> {
        self.send(
            NotificationChannel::parent(notice.parent_id.clone()),
            FRIENDSHIP_APPROVED_EVENT,
            &notice.to_push(),
        )
        .await
    }
}

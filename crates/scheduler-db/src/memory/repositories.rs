//! In-memory implementations of the repository traits
//!
//! Listing order matches the PostgreSQL queries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use scheduler_core::entities::{
    ApprovalRequest, Child, DeliveryLog, Friendship, Invitation, Parent,
};
use scheduler_core::error::DomainError;
use scheduler_core::traits::{
    ApprovalRequestRepository, ChildRepository, DeliveryLogRepository, FriendshipRepository,
    InvitationRepository, ParentRepository, RepoResult,
};
use scheduler_core::value_objects::{EmailAddress, RecordId};

use super::collection::{InsertError, MemoryCollection};

fn newest_first<T>(mut records: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    records.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
    records
}

fn oldest_first<T>(mut records: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    records.sort_by_key(|r| created_at(r));
    records
}

// ============================================================================
// Invitations
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryInvitationRepository {
    records: Arc<MemoryCollection<Invitation>>,
}

impl MemoryInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvitationRepository for MemoryInvitationRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Invitation>> {
        Ok(self.records.get(id))
    }

    async fn find_by_sender_child(&self, child_id: &RecordId) -> RepoResult<Vec<Invitation>> {
        let found = self.records.filter(|i| &i.sender.child_id == child_id);
        Ok(newest_first(found, |i| i.created_at))
    }

    async fn find_by_recipient_email(&self, email: &EmailAddress) -> RepoResult<Vec<Invitation>> {
        let found = self.records.filter(|i| &i.recipient_email == email);
        Ok(newest_first(found, |i| i.created_at))
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    async fn create(&self, invitation: &Invitation) -> RepoResult<()> {
        if !self.records.insert(invitation.id.clone(), invitation.clone()) {
            return Err(DomainError::InternalError(format!(
                "duplicate invitation id {}",
                invitation.id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    async fn update(&self, invitation: &Invitation) -> RepoResult<()> {
        if !self.records.replace(&invitation.id, invitation.clone()) {
            return Err(DomainError::InvitationNotFound(invitation.id.clone()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn expire_stale(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let changed = self.records.update_where(|i| i.expire_if_stale(now));
        Ok(changed.len() as u64)
    }
}

// ============================================================================
// Approval requests
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryApprovalRequestRepository {
    records: Arc<MemoryCollection<ApprovalRequest>>,
}

impl MemoryApprovalRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApprovalRequestRepository for MemoryApprovalRequestRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<ApprovalRequest>> {
        Ok(self.records.get(id))
    }

    async fn find_by_parent(&self, parent_id: &RecordId) -> RepoResult<Vec<ApprovalRequest>> {
        Ok(self.records.filter(|r| &r.parent_id == parent_id))
    }

    async fn find_by_invitation(
        &self,
        invitation_id: &RecordId,
    ) -> RepoResult<Vec<ApprovalRequest>> {
        let found = self.records.filter(|r| &r.invitation_id == invitation_id);
        Ok(oldest_first(found, |r| r.created_at))
    }

    #[instrument(skip(self, request), fields(request_id = %request.id))]
    async fn create(&self, request: &ApprovalRequest) -> RepoResult<()> {
        self.records
            .insert_unique(request.id.clone(), request.clone(), |existing| {
                existing.invitation_id == request.invitation_id
                    && existing.request_type == request.request_type
            })
            .map_err(|e| match e {
                InsertError::DuplicateId => {
                    DomainError::InternalError(format!("duplicate approval request id {}", request.id))
                }
                InsertError::Conflict => DomainError::InternalError(format!(
                    "{} approval request already exists for invitation {}",
                    request.request_type, request.invitation_id
                )),
            })
    }

    #[instrument(skip(self, request), fields(request_id = %request.id))]
    async fn update(&self, request: &ApprovalRequest) -> RepoResult<()> {
        if !self.records.replace(&request.id, request.clone()) {
            return Err(DomainError::ApprovalRequestNotFound(request.id.clone()));
        }
        Ok(())
    }

    async fn count_pending_for_parent(&self, parent_id: &RecordId) -> RepoResult<i64> {
        let pending = self
            .records
            .filter(|r| &r.parent_id == parent_id && r.is_pending());
        Ok(pending.len() as i64)
    }

    #[instrument(skip(self))]
    async fn expire_stale(&self, now: DateTime<Utc>) -> RepoResult<Vec<ApprovalRequest>> {
        Ok(self.records.update_where(|r| r.expire_if_stale(now)))
    }
}

// ============================================================================
// Friendships
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryFriendshipRepository {
    records: Arc<MemoryCollection<Friendship>>,
}

impl MemoryFriendshipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FriendshipRepository for MemoryFriendshipRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Friendship>> {
        Ok(self.records.get(id))
    }

    async fn find_by_child1(&self, child_id: &RecordId) -> RepoResult<Vec<Friendship>> {
        let found = self.records.filter(|f| &f.child1_id == child_id);
        Ok(newest_first(found, |f| f.created_at))
    }

    async fn find_by_child2(&self, child_id: &RecordId) -> RepoResult<Vec<Friendship>> {
        let found = self.records.filter(|f| &f.child2_id == child_id);
        Ok(newest_first(found, |f| f.created_at))
    }

    async fn find_between(
        &self,
        child_a: &RecordId,
        child_b: &RecordId,
    ) -> RepoResult<Option<Friendship>> {
        let found = self.records.filter(|f| {
            (&f.child1_id == child_a && &f.child2_id == child_b)
                || (&f.child1_id == child_b && &f.child2_id == child_a)
        });
        Ok(newest_first(found, |f| f.created_at).into_iter().next())
    }

    #[instrument(skip(self, friendship), fields(friendship_id = %friendship.id))]
    async fn create(&self, friendship: &Friendship) -> RepoResult<()> {
        self.records
            .insert_unique(friendship.id.clone(), friendship.clone(), |existing| {
                existing.invitation_id == friendship.invitation_id
            })
            .map_err(|e| match e {
                InsertError::DuplicateId => DomainError::InternalError(format!(
                    "duplicate friendship id {}",
                    friendship.id
                )),
                InsertError::Conflict => DomainError::AlreadyFriends,
            })
    }

    #[instrument(skip(self, friendship), fields(friendship_id = %friendship.id))]
    async fn update(&self, friendship: &Friendship) -> RepoResult<()> {
        if !self.records.replace(&friendship.id, friendship.clone()) {
            return Err(DomainError::FriendshipNotFound(friendship.id.clone()));
        }
        Ok(())
    }
}

// ============================================================================
// Children
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryChildRepository {
    records: Arc<MemoryCollection<Child>>,
}

impl MemoryChildRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChildRepository for MemoryChildRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Child>> {
        Ok(self.records.get(id))
    }

    async fn find_by_parent(&self, parent_id: &RecordId) -> RepoResult<Vec<Child>> {
        let found = self.records.filter(|c| &c.parent_id == parent_id);
        Ok(oldest_first(found, |c| c.created_at))
    }

    async fn create(&self, child: &Child) -> RepoResult<()> {
        if !self.records.insert(child.id.clone(), child.clone()) {
            return Err(DomainError::InternalError(format!(
                "duplicate child id {}",
                child.id
            )));
        }
        Ok(())
    }

    async fn update(&self, child: &Child) -> RepoResult<()> {
        if !self.records.replace(&child.id, child.clone()) {
            return Err(DomainError::ChildNotFound(child.id.clone()));
        }
        Ok(())
    }
}

// ============================================================================
// Parents
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryParentRepository {
    records: Arc<MemoryCollection<Parent>>,
}

impl MemoryParentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParentRepository for MemoryParentRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Parent>> {
        Ok(self.records.get(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Parent>> {
        let found = self.records.filter(|p| p.email == email);
        Ok(oldest_first(found, |p| p.created_at).into_iter().next())
    }

    #[instrument(skip(self, parent), fields(parent_id = %parent.id))]
    async fn upsert(&self, parent: &Parent) -> RepoResult<()> {
        self.records
            .upsert_with(parent.id.clone(), parent.clone(), |existing, incoming| Parent {
                device_token: existing.device_token.clone(),
                pending_approval_count: existing.pending_approval_count,
                created_at: existing.created_at,
                ..incoming
            });
        Ok(())
    }

    async fn set_device_token(&self, id: &RecordId, token: Option<&str>) -> RepoResult<()> {
        let now = Utc::now();
        let found = self.records.modify(id, |p| {
            p.device_token = token.map(str::to_string);
            p.updated_at = now;
        });
        if !found {
            return Err(DomainError::ParentNotFound(id.clone()));
        }
        Ok(())
    }

    async fn set_pending_approval_count(&self, id: &RecordId, count: i64) -> RepoResult<()> {
        if !self.records.modify(id, |p| p.pending_approval_count = count) {
            return Err(DomainError::ParentNotFound(id.clone()));
        }
        Ok(())
    }
}

// ============================================================================
// Delivery logs
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryDeliveryLogRepository {
    records: Arc<MemoryCollection<DeliveryLog>>,
}

impl MemoryDeliveryLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every log entry, oldest first
    pub fn all(&self) -> Vec<DeliveryLog> {
        oldest_first(self.records.filter(|_| true), |l| l.created_at)
    }
}

#[async_trait]
impl DeliveryLogRepository for MemoryDeliveryLogRepository {
    async fn create(&self, log: &DeliveryLog) -> RepoResult<()> {
        if !self.records.insert(log.id.clone(), log.clone()) {
            return Err(DomainError::InternalError(format!(
                "duplicate delivery log id {}",
                log.id
            )));
        }
        Ok(())
    }

    async fn find_by_reference(&self, reference_id: &RecordId) -> RepoResult<Vec<DeliveryLog>> {
        let found = self.records.filter(|l| &l.reference_id == reference_id);
        Ok(oldest_first(found, |l| l.created_at))
    }
}

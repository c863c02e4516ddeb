//! Repository traits (ports) - define the interface for data access
//!
//! One trait per collection. Implementations exist for PostgreSQL and for an
//! in-memory store; the workflow services only see these traits.
//! `update` on a record that does not exist fails with the collection's
//! not-found error. `expire_stale` is applied as one atomic batch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ApprovalRequest, Child, DeliveryLog, Friendship, Invitation, Parent};
use crate::error::DomainError;
use crate::value_objects::{EmailAddress, RecordId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Invitation Repository
// ============================================================================

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Invitation>>;

    /// All invitations sent by a child, any status
    async fn find_by_sender_child(&self, child_id: &RecordId) -> RepoResult<Vec<Invitation>>;

    /// All invitations addressed to an email, any status
    async fn find_by_recipient_email(&self, email: &EmailAddress) -> RepoResult<Vec<Invitation>>;

    async fn create(&self, invitation: &Invitation) -> RepoResult<()>;

    async fn update(&self, invitation: &Invitation) -> RepoResult<()>;

    /// Move every pending invitation with `expires_at < now` to `expired`.
    /// Returns the number of invitations changed.
    async fn expire_stale(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Approval Request Repository
// ============================================================================

#[async_trait]
pub trait ApprovalRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<ApprovalRequest>>;

    /// All requests addressed to a parent, any status
    async fn find_by_parent(&self, parent_id: &RecordId) -> RepoResult<Vec<ApprovalRequest>>;

    async fn find_by_invitation(
        &self,
        invitation_id: &RecordId,
    ) -> RepoResult<Vec<ApprovalRequest>>;

    async fn create(&self, request: &ApprovalRequest) -> RepoResult<()>;

    async fn update(&self, request: &ApprovalRequest) -> RepoResult<()>;

    /// Number of requests in `pending` status for a parent
    async fn count_pending_for_parent(&self, parent_id: &RecordId) -> RepoResult<i64>;

    /// Move every pending request with `expires_at < now` to `expired`.
    /// Returns the requests as they are after the change.
    async fn expire_stale(&self, now: DateTime<Utc>) -> RepoResult<Vec<ApprovalRequest>>;
}

// ============================================================================
// Friendship Repository
// ============================================================================

#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Friendship>>;

    /// Friendships where the child is on side 1
    async fn find_by_child1(&self, child_id: &RecordId) -> RepoResult<Vec<Friendship>>;

    /// Friendships where the child is on side 2
    async fn find_by_child2(&self, child_id: &RecordId) -> RepoResult<Vec<Friendship>>;

    /// Friendship between two children, on either side
    async fn find_between(
        &self,
        child_a: &RecordId,
        child_b: &RecordId,
    ) -> RepoResult<Option<Friendship>>;

    async fn create(&self, friendship: &Friendship) -> RepoResult<()>;

    async fn update(&self, friendship: &Friendship) -> RepoResult<()>;
}

// ============================================================================
// Child Repository
// ============================================================================

#[async_trait]
pub trait ChildRepository: Send + Sync {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Child>>;

    async fn find_by_parent(&self, parent_id: &RecordId) -> RepoResult<Vec<Child>>;

    async fn create(&self, child: &Child) -> RepoResult<()>;

    async fn update(&self, child: &Child) -> RepoResult<()>;
}

// ============================================================================
// Parent Repository
// ============================================================================

#[async_trait]
pub trait ParentRepository: Send + Sync {
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Parent>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Parent>>;

    /// Insert or replace the profile fields. Device token and badge count of
    /// an existing parent are left untouched.
    async fn upsert(&self, parent: &Parent) -> RepoResult<()>;

    async fn set_device_token(&self, id: &RecordId, token: Option<&str>) -> RepoResult<()>;

    async fn set_pending_approval_count(&self, id: &RecordId, count: i64) -> RepoResult<()>;
}

// ============================================================================
// Delivery Log Repository
// ============================================================================

#[async_trait]
pub trait DeliveryLogRepository: Send + Sync {
    async fn create(&self, log: &DeliveryLog) -> RepoResult<()>;

    /// Logs about one invitation or approval request, oldest first
    async fn find_by_reference(&self, reference_id: &RecordId) -> RepoResult<Vec<DeliveryLog>>;
}

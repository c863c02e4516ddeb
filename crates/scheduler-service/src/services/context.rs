//! Service context - dependency container for services
//!
//! Holds the repositories, the notifier, the clock and the workflow settings.
//! Everything is behind an `Arc`, so cloning the context is cheap.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use scheduler_cache::RedisPool;
use scheduler_core::notifications::MessageSettings;
use scheduler_core::traits::{
    ApprovalRequestRepository, ChildRepository, Clock, DeliveryLogRepository,
    FriendshipRepository, InvitationRepository, Notifier, ParentRepository, SystemClock,
};
use scheduler_db::{MemoryStore, PgPool};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    invitation_repo: Arc<dyn InvitationRepository>,
    approval_request_repo: Arc<dyn ApprovalRequestRepository>,
    friendship_repo: Arc<dyn FriendshipRepository>,
    child_repo: Arc<dyn ChildRepository>,
    parent_repo: Arc<dyn ParentRepository>,
    delivery_log_repo: Arc<dyn DeliveryLogRepository>,

    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    settings: MessageSettings,

    // Infrastructure handles, for readiness probes
    db_pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
}

impl ServiceContext {
    // === Repositories ===

    pub fn invitation_repo(&self) -> &dyn InvitationRepository {
        self.invitation_repo.as_ref()
    }

    pub fn approval_request_repo(&self) -> &dyn ApprovalRequestRepository {
        self.approval_request_repo.as_ref()
    }

    pub fn friendship_repo(&self) -> &dyn FriendshipRepository {
        self.friendship_repo.as_ref()
    }

    pub fn child_repo(&self) -> &dyn ChildRepository {
        self.child_repo.as_ref()
    }

    pub fn parent_repo(&self) -> &dyn ParentRepository {
        self.parent_repo.as_ref()
    }

    pub fn delivery_log_repo(&self) -> &dyn DeliveryLogRepository {
        self.delivery_log_repo.as_ref()
    }

    // === Delivery ===

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    // === Time and settings ===

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn settings(&self) -> &MessageSettings {
        &self.settings
    }

    /// Lifetime of a new invitation
    pub fn invitation_ttl(&self) -> Duration {
        Duration::days(self.settings.invitation_ttl_days)
    }

    // === Infrastructure ===

    /// PostgreSQL pool, when the store is backed by PostgreSQL
    pub fn db_pool(&self) -> Option<&PgPool> {
        self.db_pool.as_ref()
    }

    /// Redis pool, when notifications go through Redis
    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .field("db_pool", &self.db_pool.is_some())
            .field("redis_pool", &self.redis_pool.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    invitation_repo: Option<Arc<dyn InvitationRepository>>,
    approval_request_repo: Option<Arc<dyn ApprovalRequestRepository>>,
    friendship_repo: Option<Arc<dyn FriendshipRepository>>,
    child_repo: Option<Arc<dyn ChildRepository>>,
    parent_repo: Option<Arc<dyn ParentRepository>>,
    delivery_log_repo: Option<Arc<dyn DeliveryLogRepository>>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Option<Arc<dyn Clock>>,
    settings: Option<MessageSettings>,
    db_pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invitation_repo(mut self, repo: Arc<dyn InvitationRepository>) -> Self {
        self.invitation_repo = Some(repo);
        self
    }

    pub fn approval_request_repo(mut self, repo: Arc<dyn ApprovalRequestRepository>) -> Self {
        self.approval_request_repo = Some(repo);
        self
    }

    pub fn friendship_repo(mut self, repo: Arc<dyn FriendshipRepository>) -> Self {
        self.friendship_repo = Some(repo);
        self
    }

    pub fn child_repo(mut self, repo: Arc<dyn ChildRepository>) -> Self {
        self.child_repo = Some(repo);
        self
    }

    pub fn parent_repo(mut self, repo: Arc<dyn ParentRepository>) -> Self {
        self.parent_repo = Some(repo);
        self
    }

    pub fn delivery_log_repo(mut self, repo: Arc<dyn DeliveryLogRepository>) -> Self {
        self.delivery_log_repo = Some(repo);
        self
    }

    /// Use every repository of an in-memory store
    pub fn memory_store(self, store: &MemoryStore) -> Self {
        self.invitation_repo(Arc::new(store.invitations.clone()))
            .approval_request_repo(Arc::new(store.approval_requests.clone()))
            .friendship_repo(Arc::new(store.friendships.clone()))
            .child_repo(Arc::new(store.children.clone()))
            .parent_repo(Arc::new(store.parents.clone()))
            .delivery_log_repo(Arc::new(store.delivery_logs.clone()))
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Defaults to the system clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Defaults to [`MessageSettings::default`]
    pub fn settings(mut self, settings: MessageSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, pool: RedisPool) -> Self {
        self.redis_pool = Some(pool);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            invitation_repo: required(self.invitation_repo, "invitation_repo")?,
            approval_request_repo: required(self.approval_request_repo, "approval_request_repo")?,
            friendship_repo: required(self.friendship_repo, "friendship_repo")?,
            child_repo: required(self.child_repo, "child_repo")?,
            parent_repo: required(self.parent_repo, "parent_repo")?,
            delivery_log_repo: required(self.delivery_log_repo, "delivery_log_repo")?,
            notifier: required(self.notifier, "notifier")?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            settings: self.settings.unwrap_or_default(),
            db_pool: self.db_pool,
            redis_pool: self.redis_pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::LogNotifier;

    #[test]
    fn test_build_requires_notifier() {
        let store = MemoryStore::new();
        let err = ServiceContextBuilder::new()
            .memory_store(&store)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("notifier is required"));
    }

    #[test]
    fn test_build_with_defaults() {
        let store = MemoryStore::new();
        let ctx = ServiceContextBuilder::new()
            .memory_store(&store)
            .notifier(Arc::new(LogNotifier))
            .build()
            .unwrap();

        assert_eq!(ctx.invitation_ttl(), Duration::days(30));
        assert!(ctx.db_pool().is_none());
        assert!(ctx.redis_pool().is_none());
    }
}

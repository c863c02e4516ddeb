//! In-memory record store
//!
//! Each collection is a map guarded by a `parking_lot::RwLock`. Batch
//! updates run under a single write guard, so readers see a batch either
//! entirely applied or not at all.

mod collection;
mod repositories;

pub use collection::{InsertError, MemoryCollection};
pub use repositories::{
    MemoryApprovalRequestRepository, MemoryChildRepository, MemoryDeliveryLogRepository,
    MemoryFriendshipRepository, MemoryInvitationRepository, MemoryParentRepository,
};

/// One repository per collection, sharing nothing
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub invitations: MemoryInvitationRepository,
    pub approval_requests: MemoryApprovalRequestRepository,
    pub friendships: MemoryFriendshipRepository,
    pub children: MemoryChildRepository,
    pub parents: MemoryParentRepository,
    pub delivery_logs: MemoryDeliveryLogRepository,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

//! Friendship service
//!
//! Parent controls over an existing friendship and the per-child listings.
//! Only the two parents on a friendship may change it.

use scheduler_core::entities::{Child, Friendship};
use scheduler_core::error::DomainError;
use scheduler_core::value_objects::RecordId;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Friendship service
pub struct FriendshipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendshipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set the caller's pause flag
    #[instrument(skip(self))]
    pub async fn pause_friendship(
        &self,
        friendship_id: &RecordId,
        parent_id: &RecordId,
    ) -> ServiceResult<Friendship> {
        let mut friendship = self.load(friendship_id).await?;
        let side = friendship.pause(parent_id, self.ctx.now())?;
        self.ctx.friendship_repo().update(&friendship).await?;

        info!(friendship_id = %friendship.id, side = ?side, "Friendship paused");
        Ok(friendship)
    }

    /// Clear the caller's pause flag
    #[instrument(skip(self))]
    pub async fn resume_friendship(
        &self,
        friendship_id: &RecordId,
        parent_id: &RecordId,
    ) -> ServiceResult<Friendship> {
        let mut friendship = self.load(friendship_id).await?;
        let side = friendship.resume(parent_id, self.ctx.now())?;
        self.ctx.friendship_repo().update(&friendship).await?;

        info!(friendship_id = %friendship.id, side = ?side, "Friendship resumed");
        Ok(friendship)
    }

    #[instrument(skip(self))]
    pub async fn block_friendship(
        &self,
        friendship_id: &RecordId,
        parent_id: &RecordId,
    ) -> ServiceResult<Friendship> {
        let mut friendship = self.load(friendship_id).await?;
        let side = friendship.block(parent_id, self.ctx.now())?;
        self.ctx.friendship_repo().update(&friendship).await?;

        info!(friendship_id = %friendship.id, side = ?side, "Friendship blocked");
        Ok(friendship)
    }

    /// Every friendship the child is part of, newest first
    #[instrument(skip(self))]
    pub async fn fetch_friendships(&self, child_id: &RecordId) -> ServiceResult<Vec<Friendship>> {
        let repo = self.ctx.friendship_repo();
        let mut friendships = repo.find_by_child1(child_id).await?;
        friendships.extend(repo.find_by_child2(child_id).await?);
        friendships.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(friendships)
    }

    /// Profiles of the child's active friends. A friend without a profile
    /// fails the whole list with `ChildNotFound`.
    #[instrument(skip(self))]
    pub async fn fetch_friends(&self, child_id: &RecordId) -> ServiceResult<Vec<Child>> {
        let friendships = self.fetch_friendships(child_id).await?;
        let mut friends = Vec::new();

        for friendship in friendships.iter().filter(|f| f.is_active()) {
            let Some(friend_id) = friendship.counterpart_of(child_id) else {
                continue;
            };
            let child = self
                .ctx
                .child_repo()
                .find_by_id(friend_id)
                .await?
                .ok_or_else(|| DomainError::ChildNotFound(friend_id.clone()))?;
            friends.push(child);
        }

        Ok(friends)
    }

    async fn load(&self, friendship_id: &RecordId) -> ServiceResult<Friendship> {
        self.ctx
            .friendship_repo()
            .find_by_id(friendship_id)
            .await?
            .ok_or_else(|| DomainError::FriendshipNotFound(friendship_id.clone()).into())
    }
}

//! Friendship entity <-> model mapper

use scheduler_core::entities::{Friendship, FriendshipStatus};
use scheduler_core::DomainError;

use super::{corrupt, parse_id};
use crate::models::FriendshipModel;

impl TryFrom<FriendshipModel> for Friendship {
    type Error = DomainError;

    fn try_from(model: FriendshipModel) -> Result<Self, Self::Error> {
        Ok(Friendship {
            id: parse_id("friendships.id", &model.id)?,
            child1_id: parse_id("friendships.child1_id", &model.child1_id)?,
            child1_name: model.child1_name,
            child2_id: parse_id("friendships.child2_id", &model.child2_id)?,
            child2_name: model.child2_name,
            parent1_id: parse_id("friendships.parent1_id", &model.parent1_id)?,
            parent2_id: parse_id("friendships.parent2_id", &model.parent2_id)?,
            status: FriendshipStatus::parse(&model.status)
                .ok_or_else(|| corrupt("friendships.status", &model.status))?,
            is_paused_by_parent1: model.is_paused_by_parent1,
            is_paused_by_parent2: model.is_paused_by_parent2,
            invitation_id: parse_id("friendships.invitation_id", &model.invitation_id)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Friendship> for FriendshipModel {
    fn from(f: &Friendship) -> Self {
        Self {
            id: f.id.to_string(),
            child1_id: f.child1_id.to_string(),
            child1_name: f.child1_name.clone(),
            child2_id: f.child2_id.to_string(),
            child2_name: f.child2_name.clone(),
            parent1_id: f.parent1_id.to_string(),
            parent2_id: f.parent2_id.to_string(),
            status: f.status.as_str().to_string(),
            is_paused_by_parent1: f.is_paused_by_parent1,
            is_paused_by_parent2: f.is_paused_by_parent2,
            invitation_id: f.invitation_id.to_string(),
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

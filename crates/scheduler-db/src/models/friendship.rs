//! Friendship database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for friendships table
#[derive(Debug, Clone, FromRow)]
pub struct FriendshipModel {
    pub id: String,
    pub child1_id: String,
    pub child1_name: String,
    pub child2_id: String,
    pub child2_name: String,
    pub parent1_id: String,
    pub parent2_id: String,
    pub status: String,
    pub is_paused_by_parent1: bool,
    pub is_paused_by_parent2: bool,
    pub invitation_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) const FRIENDSHIP_COLUMNS: &str = "id, child1_id, child1_name, child2_id, \
    child2_name, parent1_id, parent2_id, status, is_paused_by_parent1, is_paused_by_parent2, \
    invitation_id, created_at, updated_at";

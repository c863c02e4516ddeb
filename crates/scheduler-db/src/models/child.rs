//! Child database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for children table
#[derive(Debug, Clone, FromRow)]
pub struct ChildModel {
    pub id: String,
    pub parent_id: String,
    pub child_name: String,
    pub age: Option<i32>,
    pub avatar_url: Option<String>,
    pub avatar_emoji: Option<String>,
    pub group_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

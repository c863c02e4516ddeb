//! Child entity - a child profile managed by one parent

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Child entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub id: RecordId,
    pub parent_id: RecordId,
    pub child_name: String,
    pub age: Option<i32>,
    pub avatar_url: Option<String>,
    pub avatar_emoji: Option<String>,
    pub group_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Child {
    pub fn new(id: RecordId, parent_id: RecordId, child_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            parent_id,
            child_name,
            age: None,
            avatar_url: None,
            avatar_emoji: None,
            group_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, parent_id: &RecordId) -> bool {
        &self.parent_id == parent_id
    }
}

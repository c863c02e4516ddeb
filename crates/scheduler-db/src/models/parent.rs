//! Parent database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for parents table
#[derive(Debug, Clone, FromRow)]
pub struct ParentModel {
    pub id: String,
    pub email: String,
    pub parent_name: String,
    pub linked_children: Vec<String>,
    pub device_token: Option<String>,
    pub pending_approval_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

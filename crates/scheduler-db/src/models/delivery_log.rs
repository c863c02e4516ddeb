//! Delivery log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for delivery_logs table
#[derive(Debug, Clone, FromRow)]
pub struct DeliveryLogModel {
    pub id: String,
    pub kind: String,
    pub recipient: String,
    pub reference_id: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

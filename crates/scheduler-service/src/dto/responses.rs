//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Wire names are
//! camelCase, matching the mobile client's models.

use chrono::{DateTime, Utc};
use scheduler_core::entities::{
    ApprovalRequestType, ApprovalStatus, FriendshipStatus, InvitationStatus,
};
use serde::Serialize;

// ============================================================================
// Profile Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentResponse {
    pub id: String,
    pub email: String,
    pub parent_name: String,
    pub linked_children: Vec<String>,
    /// Whether a device is registered for push
    pub has_device_token: bool,
    pub pending_approval_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildResponse {
    pub id: String,
    pub parent_id: String,
    pub child_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_emoji: Option<String>,
    pub group_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Workflow Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderResponse {
    pub child_id: String,
    pub child_name: String,
    pub parent_id: String,
    pub parent_name: String,
    pub parent_email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientResponse {
    pub child_id: String,
    pub child_name: String,
    pub parent_id: String,
    pub parent_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub id: String,
    pub sender: SenderResponse,
    pub recipient_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientResponse>,
    pub status: InvitationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub sender_parent_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_parent_approved_at: Option<DateTime<Utc>>,
    pub recipient_parent_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_parent_approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequestResponse {
    pub id: String,
    pub parent_id: String,
    pub child_id: String,
    pub child_name: String,
    #[serde(rename = "type")]
    pub request_type: ApprovalRequestType,
    pub invitation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_child_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_parent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_parent_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipResponse {
    pub id: String,
    pub child1_id: String,
    pub child1_name: String,
    pub child2_id: String,
    pub child2_name: String,
    pub parent1_id: String,
    pub parent2_id: String,
    pub status: FriendshipStatus,
    pub is_paused_by_parent1: bool,
    pub is_paused_by_parent2: bool,
    pub is_active: bool,
    pub invitation_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of answering an approval request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondResponse {
    pub request: ApprovalRequestResponse,
    pub invitation: InvitationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendship: Option<FriendshipResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    Healthy,
    Unhealthy,
    /// Backend not in use (in-memory store, log notifier)
    NotConfigured,
}

impl DependencyStatus {
    pub fn is_ok(self) -> bool {
        self != Self::Unhealthy
    }
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: DependencyStatus,
    pub redis: DependencyStatus,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

impl ReadinessResponse {
    pub fn new(database: DependencyStatus, redis: DependencyStatus) -> Self {
        let ready = database.is_ok() && redis.is_ok();
        Self {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database.is_ok() && self.checks.redis.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::new(DependencyStatus::Healthy, DependencyStatus::NotConfigured);
        assert_eq!(ready.status, "ready");
        assert!(ready.is_ready());

        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["checks"]["redis"], "not_configured");

        let not_ready =
            ReadinessResponse::new(DependencyStatus::Unhealthy, DependencyStatus::Healthy);
        assert_eq!(not_ready.status, "not_ready");
        assert!(!not_ready.is_ready());
    }
}

//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertParentBody {
    pub email: String,
    pub parent_name: String,
}

impl UpsertParentBody {
    pub fn unique(name: &str) -> Self {
        Self {
            email: format!("{}{}@example.com", name.to_lowercase(), unique_suffix()),
            parent_name: name.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildBody {
    pub child_name: String,
    pub age: Option<i32>,
}

impl CreateChildBody {
    pub fn named(child_name: &str) -> Self {
        Self {
            child_name: child_name.to_string(),
            age: Some(8),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationBody {
    pub child_id: String,
    pub recipient_email: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationBody {
    pub child_id: String,
}

#[derive(Debug, Serialize)]
pub struct RespondBody {
    pub approved: bool,
}

pub const APPROVE: RespondBody = RespondBody { approved: true };
pub const DENY: RespondBody = RespondBody { approved: false };

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentBody {
    pub id: String,
    pub email: String,
    pub pending_approval_count: i64,
    pub has_device_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildBody {
    pub id: String,
    pub parent_id: String,
    pub child_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationBody {
    pub id: String,
    pub status: String,
    pub recipient_email: String,
    pub sender_parent_approved: bool,
    pub recipient_parent_approved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequestBody {
    pub id: String,
    pub parent_id: String,
    #[serde(rename = "type")]
    pub request_type: String,
    pub invitation_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipBody {
    pub id: String,
    pub child1_id: String,
    pub child2_id: String,
    pub status: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondResultBody {
    pub request: ApprovalRequestBody,
    pub invitation: InvitationBody,
    pub friendship: Option<FriendshipBody>,
}

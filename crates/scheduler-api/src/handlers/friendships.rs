//! Friendship control handlers
//!
//! Either parent of a friendship may pause, resume, or block it.

use axum::{extract::State, Json};
use scheduler_service::{FriendshipResponse, FriendshipService};

use crate::extractors::{AuthParent, RecordIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /friendships/{friendship_id}/pause
pub async fn pause_friendship(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(friendship_id): RecordIdPath,
) -> ApiResult<Json<FriendshipResponse>> {
    let friendship = FriendshipService::new(state.service_context())
        .pause_friendship(&friendship_id, &auth.parent_id)
        .await?;
    Ok(Json(friendship.into()))
}

/// POST /friendships/{friendship_id}/resume
pub async fn resume_friendship(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(friendship_id): RecordIdPath,
) -> ApiResult<Json<FriendshipResponse>> {
    let friendship = FriendshipService::new(state.service_context())
        .resume_friendship(&friendship_id, &auth.parent_id)
        .await?;
    Ok(Json(friendship.into()))
}

/// Overrides any pause; a blocked friendship stays inactive
///
/// POST /friendships/{friendship_id}/block
pub async fn block_friendship(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(friendship_id): RecordIdPath,
) -> ApiResult<Json<FriendshipResponse>> {
    let friendship = FriendshipService::new(state.service_context())
        .block_friendship(&friendship_id, &auth.parent_id)
        .await?;
    Ok(Json(friendship.into()))
}

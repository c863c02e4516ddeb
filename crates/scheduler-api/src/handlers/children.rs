//! Child profile handlers
//!
//! Reads scoped to a child require the caller to be that child's parent.

use axum::{extract::State, Json};
use scheduler_service::{
    ChildResponse, CreateChildRequest, FriendshipResponse, FriendshipService, InvitationResponse,
    InvitationService, ProfileService,
};

use crate::extractors::{AuthParent, RecordIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /children
pub async fn create_child(
    State(state): State<AppState>,
    auth: AuthParent,
    ValidatedJson(request): ValidatedJson<CreateChildRequest>,
) -> ApiResult<Created<Json<ChildResponse>>> {
    let child = ProfileService::new(state.service_context())
        .create_child(&auth.parent_id, request)
        .await?;
    Ok(Created(Json(ChildResponse::from(&child))))
}

/// GET /children
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthParent,
) -> ApiResult<Json<Vec<ChildResponse>>> {
    let children = ProfileService::new(state.service_context())
        .list_children(&auth.parent_id)
        .await?;
    Ok(Json(children.iter().map(Into::into).collect()))
}

/// GET /children/{child_id}
pub async fn get_child(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(child_id): RecordIdPath,
) -> ApiResult<Json<ChildResponse>> {
    let child = ProfileService::new(state.service_context())
        .get_child(&auth.parent_id, &child_id)
        .await?;
    Ok(Json(ChildResponse::from(&child)))
}

/// Invitations the child sent that are still in play
///
/// GET /children/{child_id}/invitations
pub async fn get_sent_invitations(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(child_id): RecordIdPath,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let ctx = state.service_context();
    ProfileService::new(ctx).get_child(&auth.parent_id, &child_id).await?;

    let invitations = InvitationService::new(ctx)
        .fetch_sent_invitations(&child_id)
        .await?;
    Ok(Json(invitations.into_iter().map(Into::into).collect()))
}

/// Every friendship the child is part of, paused and blocked included
///
/// GET /children/{child_id}/friendships
pub async fn get_friendships(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(child_id): RecordIdPath,
) -> ApiResult<Json<Vec<FriendshipResponse>>> {
    let ctx = state.service_context();
    ProfileService::new(ctx).get_child(&auth.parent_id, &child_id).await?;

    let friendships = FriendshipService::new(ctx).fetch_friendships(&child_id).await?;
    Ok(Json(friendships.into_iter().map(Into::into).collect()))
}

/// Friends the child can currently see
///
/// GET /children/{child_id}/friends
pub async fn get_friends(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(child_id): RecordIdPath,
) -> ApiResult<Json<Vec<ChildResponse>>> {
    let ctx = state.service_context();
    ProfileService::new(ctx).get_child(&auth.parent_id, &child_id).await?;

    let friends = FriendshipService::new(ctx).fetch_friends(&child_id).await?;
    Ok(Json(friends.iter().map(Into::into).collect()))
}

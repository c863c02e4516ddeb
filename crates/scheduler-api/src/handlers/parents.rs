//! Parent profile handlers
//!
//! Everything under `/parents/@me` acts on the token's parent.

use axum::{extract::State, Json};
use scheduler_service::{
    ApprovalRequestResponse, ApprovalService, DeviceTokenRequest, InvitationResponse,
    InvitationService, ParentResponse, ProfileService, UpsertParentRequest,
};

use crate::extractors::{AuthParent, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /parents/@me
pub async fn get_current_parent(
    State(state): State<AppState>,
    auth: AuthParent,
) -> ApiResult<Json<ParentResponse>> {
    let parent = ProfileService::new(state.service_context())
        .get_parent(&auth.parent_id)
        .await?;
    Ok(Json(ParentResponse::from(&parent)))
}

/// Create or update the caller's profile
///
/// PUT /parents/@me
pub async fn upsert_current_parent(
    State(state): State<AppState>,
    auth: AuthParent,
    ValidatedJson(request): ValidatedJson<UpsertParentRequest>,
) -> ApiResult<Json<ParentResponse>> {
    let parent = ProfileService::new(state.service_context())
        .upsert_parent(&auth.parent_id, request)
        .await?;
    Ok(Json(ParentResponse::from(&parent)))
}

/// Register (or clear, with `null`) the push token of the caller's device
///
/// PUT /parents/@me/device-token
pub async fn register_device_token(
    State(state): State<AppState>,
    auth: AuthParent,
    ValidatedJson(request): ValidatedJson<DeviceTokenRequest>,
) -> ApiResult<Json<ParentResponse>> {
    let parent = ProfileService::new(state.service_context())
        .register_device_token(&auth.parent_id, request.device_token)
        .await?;
    Ok(Json(ParentResponse::from(&parent)))
}

/// Invitations addressed to the caller's email that still need a child to
/// accept them
///
/// GET /parents/@me/invitations
pub async fn get_pending_invitations(
    State(state): State<AppState>,
    auth: AuthParent,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let ctx = state.service_context();
    let parent = ProfileService::new(ctx).get_parent(&auth.parent_id).await?;

    let invitations = InvitationService::new(ctx)
        .fetch_pending_invitations_by_email(&parent.email)
        .await?;
    Ok(Json(invitations.into_iter().map(Into::into).collect()))
}

/// GET /parents/@me/approval-requests
pub async fn get_pending_approval_requests(
    State(state): State<AppState>,
    auth: AuthParent,
) -> ApiResult<Json<Vec<ApprovalRequestResponse>>> {
    let requests = ApprovalService::new(state.service_context())
        .fetch_pending_approval_requests(&auth.parent_id)
        .await?;
    Ok(Json(requests.iter().map(Into::into).collect()))
}

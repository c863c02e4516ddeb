//! Approval request handlers

use axum::{extract::State, Json};
use scheduler_service::{ApprovalService, RespondResponse, RespondToApprovalRequest};

use crate::extractors::{AuthParent, RecordIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Approve or deny; only the parent the request was issued to may answer
///
/// POST /approval-requests/{request_id}/respond
pub async fn respond_to_approval_request(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(request_id): RecordIdPath,
    ValidatedJson(request): ValidatedJson<RespondToApprovalRequest>,
) -> ApiResult<Json<RespondResponse>> {
    let outcome = ApprovalService::new(state.service_context())
        .respond_to_approval_request(&request_id, &auth.parent_id, request.approved)
        .await?;
    Ok(Json(RespondResponse::from(&outcome)))
}

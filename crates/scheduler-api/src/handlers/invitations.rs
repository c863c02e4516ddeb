//! Invitation handlers
//!
//! The sender's parent starts and cancels invitations; the recipient side
//! accepts or declines them on behalf of one of its children.

use axum::{extract::State, Json};
use scheduler_core::{EmailAddress, Invitation, RecordId};
use scheduler_service::{
    AcceptInvitationRequest, CreateInvitationRequest, InvitationResponse, InvitationService,
    ProfileService, ServiceContext, ServiceError, ServiceResult,
};

use crate::extractors::{AuthParent, RecordIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    auth: AuthParent,
    ValidatedJson(request): ValidatedJson<CreateInvitationRequest>,
) -> ApiResult<Created<Json<InvitationResponse>>> {
    let ctx = state.service_context();
    let sender = ProfileService::new(ctx)
        .sender_info(&auth.parent_id, &request.child_id)
        .await?;

    let invitation = InvitationService::new(ctx)
        .create_invitation(
            sender,
            &request.recipient_email,
            request.recipient_phone,
            request.message,
        )
        .await?;
    Ok(Created(Json(invitation.into())))
}

/// GET /invitations/{invitation_id}
pub async fn get_invitation(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(invitation_id): RecordIdPath,
) -> ApiResult<Json<InvitationResponse>> {
    let ctx = state.service_context();
    let invitation = InvitationService::new(ctx).get_invitation(&invitation_id).await?;

    let is_party = invitation.sender.parent_id == auth.parent_id
        || is_recipient_side(ctx, &invitation, &auth.parent_id).await?;
    if !is_party {
        return Err(ServiceError::unauthorized("Not a party to this invitation").into());
    }
    Ok(Json(invitation.into()))
}

/// Accept for one of the caller's children
///
/// POST /invitations/{invitation_id}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(invitation_id): RecordIdPath,
    ValidatedJson(request): ValidatedJson<AcceptInvitationRequest>,
) -> ApiResult<Json<InvitationResponse>> {
    let ctx = state.service_context();
    let recipient = ProfileService::new(ctx)
        .recipient_info(&auth.parent_id, &request.child_id)
        .await?;

    let invitation = InvitationService::new(ctx)
        .accept_as_recipient(&invitation_id, recipient)
        .await?;
    Ok(Json(invitation.into()))
}

/// POST /invitations/{invitation_id}/decline
pub async fn decline_invitation(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(invitation_id): RecordIdPath,
) -> ApiResult<Json<InvitationResponse>> {
    let ctx = state.service_context();
    let service = InvitationService::new(ctx);

    let invitation = service.get_invitation(&invitation_id).await?;
    if !is_recipient_side(ctx, &invitation, &auth.parent_id).await? {
        return Err(ServiceError::unauthorized("Invitation is addressed to someone else").into());
    }

    let invitation = service.decline_as_recipient(&invitation_id).await?;
    Ok(Json(invitation.into()))
}

/// POST /invitations/{invitation_id}/cancel
pub async fn cancel_invitation(
    State(state): State<AppState>,
    auth: AuthParent,
    RecordIdPath(invitation_id): RecordIdPath,
) -> ApiResult<Json<InvitationResponse>> {
    let invitation = InvitationService::new(state.service_context())
        .cancel_invitation(&invitation_id, &auth.parent_id)
        .await?;
    Ok(Json(invitation.into()))
}

/// The caller is the attached recipient's parent, or their profile email is
/// the address the invitation was sent to
async fn is_recipient_side(
    ctx: &ServiceContext,
    invitation: &Invitation,
    parent_id: &RecordId,
) -> ServiceResult<bool> {
    if invitation
        .recipient
        .as_ref()
        .is_some_and(|r| &r.parent_id == parent_id)
    {
        return Ok(true);
    }

    let Some(parent) = ctx.parent_repo().find_by_id(parent_id).await? else {
        return Ok(false);
    };
    Ok(EmailAddress::parse(&parent.email).is_ok_and(|email| email == invitation.recipient_email))
}

//! Approval request entity <-> model mapper

use scheduler_core::entities::{ApprovalRequest, ApprovalRequestType, ApprovalStatus};
use scheduler_core::DomainError;

use super::{corrupt, parse_id};
use crate::models::ApprovalRequestModel;

impl TryFrom<ApprovalRequestModel> for ApprovalRequest {
    type Error = DomainError;

    fn try_from(model: ApprovalRequestModel) -> Result<Self, Self::Error> {
        Ok(ApprovalRequest {
            id: parse_id("approval_requests.id", &model.id)?,
            parent_id: parse_id("approval_requests.parent_id", &model.parent_id)?,
            child_id: parse_id("approval_requests.child_id", &model.child_id)?,
            child_name: model.child_name,
            request_type: ApprovalRequestType::parse(&model.request_type)
                .ok_or_else(|| corrupt("approval_requests.request_type", &model.request_type))?,
            invitation_id: parse_id("approval_requests.invitation_id", &model.invitation_id)?,
            other_child_name: model.other_child_name,
            other_parent_name: model.other_parent_name,
            other_parent_email: model.other_parent_email,
            message: model.message,
            status: ApprovalStatus::parse(&model.status)
                .ok_or_else(|| corrupt("approval_requests.status", &model.status))?,
            created_at: model.created_at,
            responded_at: model.responded_at,
            expires_at: model.expires_at,
        })
    }
}

impl From<&ApprovalRequest> for ApprovalRequestModel {
    fn from(req: &ApprovalRequest) -> Self {
        Self {
            id: req.id.to_string(),
            parent_id: req.parent_id.to_string(),
            child_id: req.child_id.to_string(),
            child_name: req.child_name.clone(),
            request_type: req.request_type.as_str().to_string(),
            invitation_id: req.invitation_id.to_string(),
            other_child_name: req.other_child_name.clone(),
            other_parent_name: req.other_parent_name.clone(),
            other_parent_email: req.other_parent_email.clone(),
            message: req.message.clone(),
            status: req.status.as_str().to_string(),
            created_at: req.created_at,
            responded_at: req.responded_at,
            expires_at: req.expires_at,
        }
    }
}

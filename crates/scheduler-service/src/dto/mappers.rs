//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use scheduler_core::entities::{
    ApprovalRequest, Child, Friendship, Invitation, Parent, RecipientInfo, SenderInfo,
};

use super::responses::{
    ApprovalRequestResponse, ChildResponse, FriendshipResponse, InvitationResponse,
    ParentResponse, RecipientResponse, RespondResponse, SenderResponse,
};
use crate::services::RespondOutcome;

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&Parent> for ParentResponse {
    fn from(parent: &Parent) -> Self {
        Self {
            id: parent.id.to_string(),
            email: parent.email.clone(),
            parent_name: parent.parent_name.clone(),
            linked_children: parent.linked_children.iter().map(ToString::to_string).collect(),
            has_device_token: parent.device_token.is_some(),
            pending_approval_count: parent.pending_approval_count,
            created_at: parent.created_at,
            updated_at: parent.updated_at,
        }
    }
}

impl From<&Child> for ChildResponse {
    fn from(child: &Child) -> Self {
        Self {
            id: child.id.to_string(),
            parent_id: child.parent_id.to_string(),
            child_name: child.child_name.clone(),
            age: child.age,
            avatar_url: child.avatar_url.clone(),
            avatar_emoji: child.avatar_emoji.clone(),
            group_ids: child.group_ids.clone(),
            created_at: child.created_at,
        }
    }
}

// ============================================================================
// Workflow Mappers
// ============================================================================

impl From<&SenderInfo> for SenderResponse {
    fn from(sender: &SenderInfo) -> Self {
        Self {
            child_id: sender.child_id.to_string(),
            child_name: sender.child_name.clone(),
            parent_id: sender.parent_id.to_string(),
            parent_name: sender.parent_name.clone(),
            parent_email: sender.parent_email.clone(),
        }
    }
}

impl From<&RecipientInfo> for RecipientResponse {
    fn from(recipient: &RecipientInfo) -> Self {
        Self {
            child_id: recipient.child_id.to_string(),
            child_name: recipient.child_name.clone(),
            parent_id: recipient.parent_id.to_string(),
            parent_name: recipient.parent_name.clone(),
        }
    }
}

impl From<&Invitation> for InvitationResponse {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id.to_string(),
            sender: SenderResponse::from(&invitation.sender),
            recipient_email: invitation.recipient_email.to_string(),
            recipient_phone: invitation.recipient_phone.clone(),
            recipient: invitation.recipient.as_ref().map(RecipientResponse::from),
            status: invitation.status,
            message: invitation.message.clone(),
            sender_parent_approved: invitation.sender_parent_approved,
            sender_parent_approved_at: invitation.sender_parent_approved_at,
            recipient_parent_approved: invitation.recipient_parent_approved,
            recipient_parent_approved_at: invitation.recipient_parent_approved_at,
            created_at: invitation.created_at,
            updated_at: invitation.updated_at,
            expires_at: invitation.expires_at,
            responded_at: invitation.responded_at,
        }
    }
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self::from(&invitation)
    }
}

impl From<&ApprovalRequest> for ApprovalRequestResponse {
    fn from(request: &ApprovalRequest) -> Self {
        Self {
            id: request.id.to_string(),
            parent_id: request.parent_id.to_string(),
            child_id: request.child_id.to_string(),
            child_name: request.child_name.clone(),
            request_type: request.request_type,
            invitation_id: request.invitation_id.to_string(),
            other_child_name: request.other_child_name.clone(),
            other_parent_name: request.other_parent_name.clone(),
            other_parent_email: request.other_parent_email.clone(),
            message: request.message.clone(),
            status: request.status,
            created_at: request.created_at,
            responded_at: request.responded_at,
            expires_at: request.expires_at,
        }
    }
}

impl From<&Friendship> for FriendshipResponse {
    fn from(friendship: &Friendship) -> Self {
        Self {
            id: friendship.id.to_string(),
            child1_id: friendship.child1_id.to_string(),
            child1_name: friendship.child1_name.clone(),
            child2_id: friendship.child2_id.to_string(),
            child2_name: friendship.child2_name.clone(),
            parent1_id: friendship.parent1_id.to_string(),
            parent2_id: friendship.parent2_id.to_string(),
            status: friendship.status,
            is_paused_by_parent1: friendship.is_paused_by_parent1,
            is_paused_by_parent2: friendship.is_paused_by_parent2,
            is_active: friendship.is_active(),
            invitation_id: friendship.invitation_id.to_string(),
            created_at: friendship.created_at,
            updated_at: friendship.updated_at,
        }
    }
}

impl From<Friendship> for FriendshipResponse {
    fn from(friendship: Friendship) -> Self {
        Self::from(&friendship)
    }
}

impl From<&RespondOutcome> for RespondResponse {
    fn from(outcome: &RespondOutcome) -> Self {
        Self {
            request: ApprovalRequestResponse::from(&outcome.request),
            invitation: InvitationResponse::from(&outcome.invitation),
            friendship: outcome.friendship.as_ref().map(FriendshipResponse::from),
        }
    }
}

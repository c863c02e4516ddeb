//! Invitation entity <-> model mapper

use scheduler_core::entities::{Invitation, InvitationStatus, RecipientInfo, SenderInfo};
use scheduler_core::{DomainError, EmailAddress};

use super::{corrupt, parse_id};
use crate::models::InvitationModel;

impl TryFrom<InvitationModel> for Invitation {
    type Error = DomainError;

    fn try_from(model: InvitationModel) -> Result<Self, Self::Error> {
        let status = InvitationStatus::parse(&model.status)
            .ok_or_else(|| corrupt("invitations.status", &model.status))?;
        let recipient_email = EmailAddress::parse(&model.recipient_email)
            .map_err(|_| corrupt("invitations.recipient_email", &model.recipient_email))?;

        // The recipient is attached as a whole or not at all
        let recipient = match (
            model.recipient_child_id,
            model.recipient_child_name,
            model.recipient_parent_id,
            model.recipient_parent_name,
        ) {
            (Some(child_id), Some(child_name), Some(parent_id), Some(parent_name)) => {
                Some(RecipientInfo {
                    child_id: parse_id("invitations.recipient_child_id", &child_id)?,
                    child_name,
                    parent_id: parse_id("invitations.recipient_parent_id", &parent_id)?,
                    parent_name,
                })
            }
            (None, None, None, None) => None,
            _ => {
                return Err(corrupt(
                    "invitations.recipient_*",
                    "partially attached recipient",
                ))
            }
        };

        Ok(Invitation {
            id: parse_id("invitations.id", &model.id)?,
            sender: SenderInfo {
                child_id: parse_id("invitations.sender_child_id", &model.sender_child_id)?,
                child_name: model.sender_child_name,
                parent_id: parse_id("invitations.sender_parent_id", &model.sender_parent_id)?,
                parent_name: model.sender_parent_name,
                parent_email: model.sender_parent_email,
            },
            recipient_email,
            recipient_phone: model.recipient_phone,
            recipient,
            status,
            message: model.message,
            sender_parent_approved: model.sender_parent_approved,
            sender_parent_approved_at: model.sender_parent_approved_at,
            recipient_parent_approved: model.recipient_parent_approved,
            recipient_parent_approved_at: model.recipient_parent_approved_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
            expires_at: model.expires_at,
            responded_at: model.responded_at,
        })
    }
}

impl From<&Invitation> for InvitationModel {
    fn from(inv: &Invitation) -> Self {
        let recipient = inv.recipient.as_ref();
        Self {
            id: inv.id.to_string(),
            sender_child_id: inv.sender.child_id.to_string(),
            sender_child_name: inv.sender.child_name.clone(),
            sender_parent_id: inv.sender.parent_id.to_string(),
            sender_parent_name: inv.sender.parent_name.clone(),
            sender_parent_email: inv.sender.parent_email.clone(),
            recipient_email: inv.recipient_email.to_string(),
            recipient_phone: inv.recipient_phone.clone(),
            recipient_child_id: recipient.map(|r| r.child_id.to_string()),
            recipient_child_name: recipient.map(|r| r.child_name.clone()),
            recipient_parent_id: recipient.map(|r| r.parent_id.to_string()),
            recipient_parent_name: recipient.map(|r| r.parent_name.clone()),
            status: inv.status.as_str().to_string(),
            message: inv.message.clone(),
            sender_parent_approved: inv.sender_parent_approved,
            sender_parent_approved_at: inv.sender_parent_approved_at,
            recipient_parent_approved: inv.recipient_parent_approved,
            recipient_parent_approved_at: inv.recipient_parent_approved_at,
            created_at: inv.created_at,
            updated_at: inv.updated_at,
            expires_at: inv.expires_at,
            responded_at: inv.responded_at,
        }
    }
}

//! Parent entity <-> model mapper

use scheduler_core::entities::Parent;
use scheduler_core::DomainError;

use super::{parse_id, parse_ids};
use crate::models::ParentModel;

impl TryFrom<ParentModel> for Parent {
    type Error = DomainError;

    fn try_from(model: ParentModel) -> Result<Self, Self::Error> {
        Ok(Parent {
            id: parse_id("parents.id", &model.id)?,
            email: model.email,
            parent_name: model.parent_name,
            linked_children: parse_ids("parents.linked_children", &model.linked_children)?,
            device_token: model.device_token,
            pending_approval_count: model.pending_approval_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

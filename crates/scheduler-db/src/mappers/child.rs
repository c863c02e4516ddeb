//! Child entity <-> model mapper

use scheduler_core::entities::Child;
use scheduler_core::DomainError;

use super::parse_id;
use crate::models::ChildModel;

impl TryFrom<ChildModel> for Child {
    type Error = DomainError;

    fn try_from(model: ChildModel) -> Result<Self, Self::Error> {
        Ok(Child {
            id: parse_id("children.id", &model.id)?,
            parent_id: parse_id("children.parent_id", &model.parent_id)?,
            child_name: model.child_name,
            age: model.age,
            avatar_url: model.avatar_url,
            avatar_emoji: model.avatar_emoji,
            group_ids: model.group_ids,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

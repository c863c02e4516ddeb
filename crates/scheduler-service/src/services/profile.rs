//! Profile service
//!
//! Parent and child profiles, and resolving a parent's child into the party
//! info the invitation workflow copies onto its records.

use scheduler_core::entities::{Child, Parent, RecipientInfo, SenderInfo};
use scheduler_core::error::DomainError;
use scheduler_core::value_objects::{EmailAddress, RecordId};
use tracing::{info, instrument};

use crate::dto::{CreateChildRequest, UpsertParentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create or update the caller's parent profile
    #[instrument(skip(self, request))]
    pub async fn upsert_parent(
        &self,
        parent_id: &RecordId,
        request: UpsertParentRequest,
    ) -> ServiceResult<Parent> {
        let email = EmailAddress::parse(&request.email)?;
        let now = self.ctx.now();

        let parent = match self.ctx.parent_repo().find_by_id(parent_id).await? {
            Some(mut existing) => {
                existing.email = email.into_inner();
                existing.parent_name = request.parent_name;
                existing.updated_at = now;
                existing
            }
            None => Parent::new(parent_id.clone(), email.into_inner(), request.parent_name, now),
        };
        self.ctx.parent_repo().upsert(&parent).await?;

        info!(parent_id = %parent_id, "Parent profile saved");
        self.get_parent(parent_id).await
    }

    /// Register or clear the push token for the caller's device
    #[instrument(skip(self, device_token))]
    pub async fn register_device_token(
        &self,
        parent_id: &RecordId,
        device_token: Option<String>,
    ) -> ServiceResult<Parent> {
        self.ctx
            .parent_repo()
            .set_device_token(parent_id, device_token.as_deref())
            .await?;

        info!(parent_id = %parent_id, registered = device_token.is_some(), "Device token updated");
        self.get_parent(parent_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_parent(&self, parent_id: &RecordId) -> ServiceResult<Parent> {
        self.ctx
            .parent_repo()
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| DomainError::ParentNotFound(parent_id.clone()).into())
    }

    /// Create a child profile. The child is linked to the parent's profile
    /// when one exists.
    #[instrument(skip(self, request))]
    pub async fn create_child(
        &self,
        parent_id: &RecordId,
        request: CreateChildRequest,
    ) -> ServiceResult<Child> {
        let now = self.ctx.now();
        let mut child = Child::new(RecordId::generate(), parent_id.clone(), request.child_name, now);
        child.age = request.age;
        child.avatar_url = request.avatar_url;
        child.avatar_emoji = request.avatar_emoji;
        self.ctx.child_repo().create(&child).await?;

        if let Some(mut parent) = self.ctx.parent_repo().find_by_id(parent_id).await? {
            parent.link_child(child.id.clone(), now);
            self.ctx.parent_repo().upsert(&parent).await?;
        }

        info!(child_id = %child.id, parent_id = %parent_id, "Child profile created");
        Ok(child)
    }

    /// A child of the caller
    #[instrument(skip(self))]
    pub async fn get_child(&self, parent_id: &RecordId, child_id: &RecordId) -> ServiceResult<Child> {
        let child = self
            .ctx
            .child_repo()
            .find_by_id(child_id)
            .await?
            .ok_or_else(|| DomainError::ChildNotFound(child_id.clone()))?;

        if !child.is_owned_by(parent_id) {
            return Err(DomainError::NotChildParent.into());
        }
        Ok(child)
    }

    #[instrument(skip(self))]
    pub async fn list_children(&self, parent_id: &RecordId) -> ServiceResult<Vec<Child>> {
        Ok(self.ctx.child_repo().find_by_parent(parent_id).await?)
    }

    /// Sender party for an invitation started by the caller's child
    #[instrument(skip(self))]
    pub async fn sender_info(
        &self,
        parent_id: &RecordId,
        child_id: &RecordId,
    ) -> ServiceResult<SenderInfo> {
        let child = self.get_child(parent_id, child_id).await?;
        let parent = self.get_parent(parent_id).await?;

        Ok(SenderInfo {
            child_id: child.id,
            child_name: child.child_name,
            parent_id: parent.id,
            parent_name: parent.parent_name,
            parent_email: parent.email,
        })
    }

    /// Recipient party for an invitation accepted by the caller's child
    #[instrument(skip(self))]
    pub async fn recipient_info(
        &self,
        parent_id: &RecordId,
        child_id: &RecordId,
    ) -> ServiceResult<RecipientInfo> {
        let child = self.get_child(parent_id, child_id).await?;
        let parent = self.get_parent(parent_id).await?;

        Ok(RecipientInfo {
            child_id: child.id,
            child_name: child.child_name,
            parent_id: parent.id,
            parent_name: parent.parent_name,
        })
    }
}

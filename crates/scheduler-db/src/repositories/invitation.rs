//! PostgreSQL implementation of InvitationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use scheduler_core::entities::{Invitation, InvitationStatus};
use scheduler_core::error::DomainError;
use scheduler_core::traits::{InvitationRepository, RepoResult};
use scheduler_core::value_objects::{EmailAddress, RecordId};

use crate::models::{InvitationModel, INVITATION_COLUMNS};

use super::error::{into_entities, into_entity, map_db_error, map_unique_violation};

/// PostgreSQL implementation of InvitationRepository
#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Invitation>> {
        let sql = format!("SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = $1");
        let row = sqlx::query_as::<_, InvitationModel>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entity(row)
    }

    #[instrument(skip(self))]
    async fn find_by_sender_child(&self, child_id: &RecordId) -> RepoResult<Vec<Invitation>> {
        let sql = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations \
             WHERE sender_child_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, InvitationModel>(&sql)
            .bind(child_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_recipient_email(&self, email: &EmailAddress) -> RepoResult<Vec<Invitation>> {
        let sql = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations \
             WHERE recipient_email = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, InvitationModel>(&sql)
            .bind(email.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    async fn create(&self, invitation: &Invitation) -> RepoResult<()> {
        let m = InvitationModel::from(invitation);
        sqlx::query(
            r#"
            INSERT INTO invitations (
                id, sender_child_id, sender_child_name, sender_parent_id, sender_parent_name,
                sender_parent_email, recipient_email, recipient_phone, recipient_child_id,
                recipient_child_name, recipient_parent_id, recipient_parent_name, status,
                message, sender_parent_approved, sender_parent_approved_at,
                recipient_parent_approved, recipient_parent_approved_at, created_at,
                updated_at, expires_at, responded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22)
            "#,
        )
        .bind(&m.id)
        .bind(&m.sender_child_id)
        .bind(&m.sender_child_name)
        .bind(&m.sender_parent_id)
        .bind(&m.sender_parent_name)
        .bind(&m.sender_parent_email)
        .bind(&m.recipient_email)
        .bind(&m.recipient_phone)
        .bind(&m.recipient_child_id)
        .bind(&m.recipient_child_name)
        .bind(&m.recipient_parent_id)
        .bind(&m.recipient_parent_name)
        .bind(&m.status)
        .bind(&m.message)
        .bind(m.sender_parent_approved)
        .bind(m.sender_parent_approved_at)
        .bind(m.recipient_parent_approved)
        .bind(m.recipient_parent_approved_at)
        .bind(m.created_at)
        .bind(m.updated_at)
        .bind(m.expires_at)
        .bind(m.responded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::InternalError(format!("duplicate invitation id {}", invitation.id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    async fn update(&self, invitation: &Invitation) -> RepoResult<()> {
        let m = InvitationModel::from(invitation);
        // expires_at and the sender fields are immutable and never rewritten
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET recipient_phone = $2,
                recipient_child_id = $3,
                recipient_child_name = $4,
                recipient_parent_id = $5,
                recipient_parent_name = $6,
                status = $7,
                message = $8,
                sender_parent_approved = $9,
                sender_parent_approved_at = $10,
                recipient_parent_approved = $11,
                recipient_parent_approved_at = $12,
                updated_at = $13,
                responded_at = $14
            WHERE id = $1
            "#,
        )
        .bind(&m.id)
        .bind(&m.recipient_phone)
        .bind(&m.recipient_child_id)
        .bind(&m.recipient_child_name)
        .bind(&m.recipient_parent_id)
        .bind(&m.recipient_parent_name)
        .bind(&m.status)
        .bind(&m.message)
        .bind(m.sender_parent_approved)
        .bind(m.sender_parent_approved_at)
        .bind(m.recipient_parent_approved)
        .bind(m.recipient_parent_approved_at)
        .bind(m.updated_at)
        .bind(m.responded_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InvitationNotFound(invitation.id.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn expire_stale(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let pending: Vec<&str> = InvitationStatus::PENDING
            .iter()
            .map(|s| s.as_str())
            .collect();

        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = $1, updated_at = $2
            WHERE status = ANY($3) AND expires_at < $2
            "#,
        )
        .bind(InvitationStatus::Expired.as_str())
        .bind(now)
        .bind(pending)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

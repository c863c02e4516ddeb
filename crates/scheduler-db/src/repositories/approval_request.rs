//! PostgreSQL implementation of ApprovalRequestRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use scheduler_core::entities::{ApprovalRequest, ApprovalStatus};
use scheduler_core::error::DomainError;
use scheduler_core::traits::{ApprovalRequestRepository, RepoResult};
use scheduler_core::value_objects::RecordId;

use crate::models::{ApprovalRequestModel, APPROVAL_REQUEST_COLUMNS};

use super::error::{into_entities, into_entity, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ApprovalRequestRepository
#[derive(Clone)]
pub struct PgApprovalRequestRepository {
    pool: PgPool,
}

impl PgApprovalRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApprovalRequestRepository for PgApprovalRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<ApprovalRequest>> {
        let sql = format!("SELECT {APPROVAL_REQUEST_COLUMNS} FROM approval_requests WHERE id = $1");
        let row = sqlx::query_as::<_, ApprovalRequestModel>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entity(row)
    }

    #[instrument(skip(self))]
    async fn find_by_parent(&self, parent_id: &RecordId) -> RepoResult<Vec<ApprovalRequest>> {
        let sql = format!(
            "SELECT {APPROVAL_REQUEST_COLUMNS} FROM approval_requests WHERE parent_id = $1"
        );
        let rows = sqlx::query_as::<_, ApprovalRequestModel>(&sql)
            .bind(parent_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_invitation(
        &self,
        invitation_id: &RecordId,
    ) -> RepoResult<Vec<ApprovalRequest>> {
        let sql = format!(
            "SELECT {APPROVAL_REQUEST_COLUMNS} FROM approval_requests \
             WHERE invitation_id = $1 ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, ApprovalRequestModel>(&sql)
            .bind(invitation_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self, request), fields(request_id = %request.id))]
    async fn create(&self, request: &ApprovalRequest) -> RepoResult<()> {
        let m = ApprovalRequestModel::from(request);
        sqlx::query(
            r#"
            INSERT INTO approval_requests (
                id, parent_id, child_id, child_name, request_type, invitation_id,
                other_child_name, other_parent_name, other_parent_email, message, status,
                created_at, responded_at, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(&m.id)
        .bind(&m.parent_id)
        .bind(&m.child_id)
        .bind(&m.child_name)
        .bind(&m.request_type)
        .bind(&m.invitation_id)
        .bind(&m.other_child_name)
        .bind(&m.other_parent_name)
        .bind(&m.other_parent_email)
        .bind(&m.message)
        .bind(&m.status)
        .bind(m.created_at)
        .bind(m.responded_at)
        .bind(m.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::InternalError(format!(
                    "{} approval request already exists for invitation {}",
                    request.request_type, request.invitation_id
                ))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, request), fields(request_id = %request.id))]
    async fn update(&self, request: &ApprovalRequest) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE approval_requests
            SET other_child_name = $2,
                other_parent_name = $3,
                other_parent_email = $4,
                status = $5,
                responded_at = $6
            WHERE id = $1
            "#,
        )
        .bind(request.id.as_str())
        .bind(&request.other_child_name)
        .bind(&request.other_parent_name)
        .bind(&request.other_parent_email)
        .bind(request.status.as_str())
        .bind(request.responded_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ApprovalRequestNotFound(request.id.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_pending_for_parent(&self, parent_id: &RecordId) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM approval_requests WHERE parent_id = $1 AND status = $2",
        )
        .bind(parent_id.as_str())
        .bind(ApprovalStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn expire_stale(&self, now: DateTime<Utc>) -> RepoResult<Vec<ApprovalRequest>> {
        let sql = format!(
            "UPDATE approval_requests SET status = $1 \
             WHERE status = $2 AND expires_at < $3 \
             RETURNING {APPROVAL_REQUEST_COLUMNS}"
        );
        let rows = sqlx::query_as::<_, ApprovalRequestModel>(&sql)
            .bind(ApprovalStatus::Expired.as_str())
            .bind(ApprovalStatus::Pending.as_str())
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }
}

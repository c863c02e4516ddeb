//! PostgreSQL implementation of ParentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use scheduler_core::entities::Parent;
use scheduler_core::error::DomainError;
use scheduler_core::traits::{ParentRepository, RepoResult};
use scheduler_core::value_objects::RecordId;

use crate::models::ParentModel;

use super::error::{into_entity, map_db_error};

/// PostgreSQL implementation of ParentRepository
#[derive(Clone)]
pub struct PgParentRepository {
    pool: PgPool,
}

impl PgParentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParentRepository for PgParentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Parent>> {
        let row = sqlx::query_as::<_, ParentModel>(
            r#"
            SELECT id, email, parent_name, linked_children, device_token,
                   pending_approval_count, created_at, updated_at
            FROM parents
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entity(row)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Parent>> {
        let row = sqlx::query_as::<_, ParentModel>(
            r#"
            SELECT id, email, parent_name, linked_children, device_token,
                   pending_approval_count, created_at, updated_at
            FROM parents
            WHERE email = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entity(row)
    }

    #[instrument(skip(self, parent), fields(parent_id = %parent.id))]
    async fn upsert(&self, parent: &Parent) -> RepoResult<()> {
        let linked: Vec<String> = parent.linked_children.iter().map(ToString::to_string).collect();
        sqlx::query(
            r#"
            INSERT INTO parents (id, email, parent_name, linked_children, device_token,
                                 pending_approval_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email,
                parent_name = EXCLUDED.parent_name,
                linked_children = EXCLUDED.linked_children,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(parent.id.as_str())
        .bind(&parent.email)
        .bind(&parent.parent_name)
        .bind(linked)
        .bind(&parent.device_token)
        .bind(parent.pending_approval_count)
        .bind(parent.created_at)
        .bind(parent.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn set_device_token(&self, id: &RecordId, token: Option<&str>) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE parents SET device_token = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ParentNotFound(id.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_pending_approval_count(&self, id: &RecordId, count: i64) -> RepoResult<()> {
        let result = sqlx::query("UPDATE parents SET pending_approval_count = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(count)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ParentNotFound(id.clone()));
        }

        Ok(())
    }
}

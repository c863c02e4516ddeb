//! PostgreSQL implementation of ChildRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use scheduler_core::entities::Child;
use scheduler_core::error::DomainError;
use scheduler_core::traits::{ChildRepository, RepoResult};
use scheduler_core::value_objects::RecordId;

use crate::models::ChildModel;

use super::error::{into_entities, into_entity, map_db_error};

/// PostgreSQL implementation of ChildRepository
#[derive(Clone)]
pub struct PgChildRepository {
    pool: PgPool,
}

impl PgChildRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChildRepository for PgChildRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Child>> {
        let row = sqlx::query_as::<_, ChildModel>(
            r#"
            SELECT id, parent_id, child_name, age, avatar_url, avatar_emoji, group_ids,
                   created_at, updated_at
            FROM children
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
    async fn find_by_parent(&self, parent_id: &RecordId) -> RepoResult<Vec<Child>> {
        let rows = sqlx::query_as::<_, ChildModel>(
            r#"
            SELECT id, parent_id, child_name, age, avatar_url, avatar_emoji, group_ids,
                   created_at, updated_at
            FROM children
            WHERE parent_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(parent_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(rows)
    }

    #[instrument(skip(self, child), fields(child_id = %child.id))]
    async fn create(&self, child: &Child) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO children (id, parent_id, child_name, age, avatar_url, avatar_emoji,
                                  group_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(child.id.as_str())
        .bind(child.parent_id.as_str())
        .bind(&child.child_name)
        .bind(child.age)
        .bind(&child.avatar_url)
        .bind(&child.avatar_emoji)
        .bind(&child.group_ids)
        .bind(child.created_at)
        .bind(child.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, child), fields(child_id = %child.id))]
    async fn update(&self, child: &Child) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE children
            SET child_name = $2, age = $3, avatar_url = $4, avatar_emoji = $5,
                group_ids = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(child.id.as_str())
        .bind(&child.child_name)
        .bind(child.age)
        .bind(&child.avatar_url)
        .bind(&child.avatar_emoji)
        .bind(&child.group_ids)
        .bind(child.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChildNotFound(child.id.clone()));
        }

        Ok(())
    }
}

//! PostgreSQL implementation of FriendshipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use scheduler_core::entities::Friendship;
use scheduler_core::error::DomainError;
use scheduler_core::traits::{FriendshipRepository, RepoResult};
use scheduler_core::value_objects::RecordId;

use crate::models::{FriendshipModel, FRIENDSHIP_COLUMNS};

use super::error::{into_entities, into_entity, map_db_error, map_unique_violation};

/// PostgreSQL implementation of FriendshipRepository
#[derive(Clone)]
pub struct PgFriendshipRepository {
    pool: PgPool,
}

impl PgFriendshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_column(&self, column: &str, child_id: &RecordId) -> RepoResult<Vec<Friendship>> {
        let sql = format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE {column} = $1 \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, FriendshipModel>(&sql)
            .bind(child_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entities(rows)
    }
}

#[async_trait]
impl FriendshipRepository for PgFriendshipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Friendship>> {
        let sql = format!("SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE id = $1");
        let row = sqlx::query_as::<_, FriendshipModel>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entity(row)
    }

    #[instrument(skip(self))]
    async fn find_by_child1(&self, child_id: &RecordId) -> RepoResult<Vec<Friendship>> {
        self.find_by_column("child1_id", child_id).await
    }

    #[instrument(skip(self))]
    async fn find_by_child2(&self, child_id: &RecordId) -> RepoResult<Vec<Friendship>> {
        self.find_by_column("child2_id", child_id).await
    }

    #[instrument(skip(self))]
    async fn find_between(
        &self,
        child_a: &RecordId,
        child_b: &RecordId,
    ) -> RepoResult<Option<Friendship>> {
        let sql = format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships \
             WHERE (child1_id = $1 AND child2_id = $2) OR (child1_id = $2 AND child2_id = $1) \
             ORDER BY created_at DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, FriendshipModel>(&sql)
            .bind(child_a.as_str())
            .bind(child_b.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_entity(row)
    }

    #[instrument(skip(self, friendship), fields(friendship_id = %friendship.id))]
    async fn create(&self, friendship: &Friendship) -> RepoResult<()> {
        let m = FriendshipModel::from(friendship);
        sqlx::query(
            r#"
            INSERT INTO friendships (
                id, child1_id, child1_name, child2_id, child2_name, parent1_id, parent2_id,
                status, is_paused_by_parent1, is_paused_by_parent2, invitation_id,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&m.id)
        .bind(&m.child1_id)
        .bind(&m.child1_name)
        .bind(&m.child2_id)
        .bind(&m.child2_name)
        .bind(&m.parent1_id)
        .bind(&m.parent2_id)
        .bind(&m.status)
        .bind(m.is_paused_by_parent1)
        .bind(m.is_paused_by_parent2)
        .bind(&m.invitation_id)
        .bind(m.created_at)
        .bind(m.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyFriends))?;

        Ok(())
    }

    #[instrument(skip(self, friendship), fields(friendship_id = %friendship.id))]
    async fn update(&self, friendship: &Friendship) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE friendships
            SET status = $2,
                is_paused_by_parent1 = $3,
                is_paused_by_parent2 = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(friendship.id.as_str())
        .bind(friendship.status.as_str())
        .bind(friendship.is_paused_by_parent1)
        .bind(friendship.is_paused_by_parent2)
        .bind(friendship.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FriendshipNotFound(friendship.id.clone()));
        }

        Ok(())
    }
}

//! PostgreSQL implementation of DeliveryLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use scheduler_core::entities::DeliveryLog;
use scheduler_core::traits::{DeliveryLogRepository, RepoResult};
use scheduler_core::value_objects::RecordId;

use crate::models::DeliveryLogModel;

use super::error::{into_entities, map_db_error};

/// PostgreSQL implementation of DeliveryLogRepository
#[derive(Clone)]
pub struct PgDeliveryLogRepository {
    pool: PgPool,
}

impl PgDeliveryLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryLogRepository for PgDeliveryLogRepository {
    #[instrument(skip(self, log), fields(kind = log.kind.as_str(), status = log.status.as_str()))]
    async fn create(&self, log: &DeliveryLog) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO delivery_logs (id, kind, recipient, reference_id, status, error, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(log.id.as_str())
        .bind(log.kind.as_str())
        .bind(&log.recipient)
        .bind(log.reference_id.as_str())
        .bind(log.status.as_str())
        .bind(&log.error)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_reference(&self, reference_id: &RecordId) -> RepoResult<Vec<DeliveryLog>> {
        let rows = sqlx::query_as::<_, DeliveryLogModel>(
            r#"
            SELECT id, kind, recipient, reference_id, status, error, created_at
            FROM delivery_logs
            WHERE reference_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(reference_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(rows)
    }
}

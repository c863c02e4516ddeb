//! Dependency wiring from configuration
//!
//! Shared by the API server and the sweeper binary.

use std::sync::Arc;

use scheduler_cache::{RedisNotifier, RedisPool};
use scheduler_common::{AppConfig, AppError, NotifierBackend, StoreBackend, WorkflowConfig};
use scheduler_core::notifications::MessageSettings;
use scheduler_db::{
    create_pool, run_migrations, DatabaseConfig, MemoryStore, PgApprovalRequestRepository,
    PgChildRepository, PgDeliveryLogRepository, PgFriendshipRepository, PgInvitationRepository,
    PgParentRepository,
};
use tracing::{info, warn};

use crate::notifier::LogNotifier;
use crate::services::{ServiceContext, ServiceContextBuilder};

/// Branding and TTL used by the workflow
pub fn message_settings(config: &WorkflowConfig) -> MessageSettings {
    MessageSettings {
        app_name: config.product_name.clone(),
        app_url: config.app_url.trim_end_matches('/').to_string(),
        invitation_ttl_days: config.invitation_ttl_days,
    }
}

/// Connect the configured store and notifier and build the service context
pub async fn build_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    let builder = ServiceContextBuilder::new().settings(message_settings(&config.workflow));

    let builder = match (config.store.backend, &config.database) {
        (StoreBackend::Postgres, Some(database)) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            if database.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!("Migrations applied");
            }
            info!("PostgreSQL connection established");

            builder
                .invitation_repo(Arc::new(PgInvitationRepository::new(pool.clone())))
                .approval_request_repo(Arc::new(PgApprovalRequestRepository::new(pool.clone())))
                .friendship_repo(Arc::new(PgFriendshipRepository::new(pool.clone())))
                .child_repo(Arc::new(PgChildRepository::new(pool.clone())))
                .parent_repo(Arc::new(PgParentRepository::new(pool.clone())))
                .delivery_log_repo(Arc::new(PgDeliveryLogRepository::new(pool.clone())))
                .db_pool(pool)
        }
        (StoreBackend::Postgres, None) => {
            return Err(AppError::Config("DATABASE_URL is required".to_string()));
        }
        (StoreBackend::Memory, _) => {
            warn!("Using in-memory record store; data is lost on restart");
            builder.memory_store(&MemoryStore::new())
        }
    };

    let builder = match (config.notifier.backend, &config.redis) {
        (NotifierBackend::Redis, Some(redis)) => {
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis notifier configured");
            builder
                .notifier(Arc::new(RedisNotifier::new(pool.clone())))
                .redis_pool(pool)
        }
        (NotifierBackend::Redis, None) => {
            return Err(AppError::Config("REDIS_URL is required".to_string()));
        }
        (NotifierBackend::Log, _) => {
            info!("Notifications are logged only");
            builder.notifier(Arc::new(LogNotifier))
        }
    };

    builder.build().map_err(|e| AppError::Config(e.to_string()))
}

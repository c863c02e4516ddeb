//! # scheduler-db
//!
//! Record store implementing the repository traits from `scheduler-core`.
//!
//! ## Overview
//!
//! Two interchangeable backends:
//!
//! - PostgreSQL via SQLx: connection pool, `FromRow` models, model to entity
//!   mappers, and the `Pg*Repository` types
//! - In-memory collections behind `parking_lot` locks, used for local runs
//!   and as the injected fake in tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scheduler_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use scheduler_db::PgInvitationRepository;
//!
//! async fn example(settings: &scheduler_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(settings)).await?;
//!     run_migrations(&pool).await?;
//!     let invitations = PgInvitationRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemoryApprovalRequestRepository, MemoryChildRepository, MemoryCollection,
    MemoryDeliveryLogRepository, MemoryFriendshipRepository, MemoryInvitationRepository,
    MemoryParentRepository, MemoryStore,
};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgApprovalRequestRepository, PgChildRepository, PgDeliveryLogRepository,
    PgFriendshipRepository, PgInvitationRepository, PgParentRepository,
};

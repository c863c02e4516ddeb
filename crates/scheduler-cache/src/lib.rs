//! # scheduler-cache
//!
//! Redis layer for handing notification payloads to the delivery workers.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: Push payloads go to `parent:{id}`, invitation emails to
//!   `outbox:email`
//! - **Notifier**: [`RedisNotifier`] implements the `Notifier` port on top of
//!   the publisher
//!
//! ## Example
//!
//! ```ignore
//! use scheduler_cache::{RedisNotifier, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let notifier = RedisNotifier::new(pool);
//! notifier.notify_approval_needed(&notice).await?;
//! ```

pub mod notifier;
pub mod pool;
pub mod pubsub;

pub use notifier::RedisNotifier;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{
    NotificationChannel, OutboundEvent, Publisher, EMAIL_OUTBOX_CHANNEL, PARENT_CHANNEL_PREFIX,
};

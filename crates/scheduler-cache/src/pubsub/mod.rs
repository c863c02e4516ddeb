//! Redis Pub/Sub module.
//!
//! Outbound notification channels and the publisher that writes to them.

mod channels;
mod publisher;

pub use channels::{NotificationChannel, EMAIL_OUTBOX_CHANNEL, PARENT_CHANNEL_PREFIX};
pub use publisher::{OutboundEvent, Publisher};

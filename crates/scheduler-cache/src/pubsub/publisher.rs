//! Redis Pub/Sub publisher.
//!
//! Wraps each payload in an [`OutboundEvent`] envelope so consumers can
//! dispatch on `event_type` before decoding `data`.

use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::Serialize;

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::NotificationChannel;

/// Event envelope for Pub/Sub messages
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    /// Event type name (e.g., "PARENT_APPROVAL", "FRIEND_INVITATION_EMAIL")
    pub event_type: String,
    pub data: serde_json::Value,
    pub published_at: DateTime<Utc>,
}

impl OutboundEvent {
    /// Wrap a serializable payload
    pub fn new<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
        published_at: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: event_type.into(),
            data: serde_json::to_value(payload)?,
            published_at,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone, Debug)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel. Returns the number of subscribers
    /// that received it.
    pub async fn publish(
        &self,
        channel: &NotificationChannel,
        event: &OutboundEvent,
    ) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_event_envelope() {
        let at = Utc::now();
        let event =
            OutboundEvent::new("PARENT_APPROVAL", &serde_json::json!({"requestId": "r1"}), at)
                .unwrap();

        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        assert_eq!(json["eventType"], "PARENT_APPROVAL");
        assert_eq!(json["data"]["requestId"], "r1");
        assert!(json["publishedAt"].is_string());
    }
}

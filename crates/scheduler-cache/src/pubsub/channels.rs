//! Pub/Sub channel naming.

use scheduler_core::RecordId;

/// Channel prefix for push payloads addressed to one parent
pub const PARENT_CHANNEL_PREFIX: &str = "parent:";
/// Channel the mail relay consumes
pub const EMAIL_OUTBOX_CHANNEL: &str = "outbox:email";

/// Notification channels
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationChannel {
    /// Push notifications for one parent's devices
    Parent(RecordId),
    /// Outgoing email queue
    EmailOutbox,
    Custom(String),
}

impl NotificationChannel {
    #[must_use]
    pub fn parent(parent_id: RecordId) -> Self {
        Self::Parent(parent_id)
    }

    #[must_use]
    pub fn email_outbox() -> Self {
        Self::EmailOutbox
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Parent(id) => format!("{PARENT_CHANNEL_PREFIX}{id}"),
            Self::EmailOutbox => EMAIL_OUTBOX_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `NotificationChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == EMAIL_OUTBOX_CHANNEL {
            return Self::EmailOutbox;
        }

        if let Some(id) = name
            .strip_prefix(PARENT_CHANNEL_PREFIX)
            .and_then(|raw| RecordId::parse(raw).ok())
        {
            return Self::Parent(id);
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

//! Notification payloads handed to the [`Notifier`](crate::traits::Notifier)

mod email;
mod push;

pub use email::InvitationEmail;
pub use push::{ApprovalNotice, FriendshipNotice, PushData, PushNotification};

/// Branding used when rendering notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSettings {
    pub app_name: String,
    /// Base URL of the web app, without trailing slash
    pub app_url: String,
    /// Invitation lifetime quoted in the email
    pub invitation_ttl_days: i64,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            app_name: "Kids Scheduler".to_string(),
            app_url: "https://kidsscheduler.app".to_string(),
            invitation_ttl_days: crate::entities::DEFAULT_INVITATION_TTL_DAYS,
        }
    }
}

//! # scheduler-core
//!
//! Domain layer containing entities, value objects, repository and notifier
//! traits, and notification payloads for the friend-approval workflow.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod notifications;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ApprovalRequest, ApprovalRequestType, ApprovalStatus, Child, DeliveryKind, DeliveryLog,
    DeliveryStatus, Friendship, FriendshipSide, FriendshipStatus, Invitation, InvitationStatus,
    Parent, RecipientInfo, SenderInfo,
};
pub use error::DomainError;
pub use notifications::{
    ApprovalNotice, FriendshipNotice, InvitationEmail, MessageSettings, PushData,
    PushNotification,
};
pub use traits::{
    ApprovalRequestRepository, ChildRepository, Clock, DeliveryLogRepository,
    FriendshipRepository, InvitationRepository, ManualClock, Notifier, ParentRepository,
    RepoResult, SystemClock,
};
pub use value_objects::{EmailAddress, RecordId, RecordIdParseError};

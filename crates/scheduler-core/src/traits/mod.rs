//! Traits (ports) - interfaces implemented by the infrastructure crates

mod clock;
mod notifier;
mod repositories;

pub use clock::{Clock, ManualClock, SystemClock};
pub use notifier::Notifier;
pub use repositories::{
    ApprovalRequestRepository, ChildRepository, DeliveryLogRepository, FriendshipRepository,
    InvitationRepository, ParentRepository, RepoResult,
};

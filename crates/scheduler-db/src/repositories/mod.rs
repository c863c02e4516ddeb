//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in scheduler-core.
//! Each repository handles database operations for one collection.

mod approval_request;
mod child;
mod delivery_log;
mod error;
mod friendship;
mod invitation;
mod parent;

pub use approval_request::PgApprovalRequestRepository;
pub use child::PgChildRepository;
pub use delivery_log::PgDeliveryLogRepository;
pub use friendship::PgFriendshipRepository;
pub use invitation::PgInvitationRepository;
pub use parent::PgParentRepository;

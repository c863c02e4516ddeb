//! Database models - SQLx-compatible structs for PostgreSQL tables

mod approval_request;
mod child;
mod delivery_log;
mod friendship;
mod invitation;
mod parent;

pub use approval_request::ApprovalRequestModel;
pub use child::ChildModel;
pub use delivery_log::DeliveryLogModel;
pub use friendship::FriendshipModel;
pub use invitation::InvitationModel;
pub use parent::ParentModel;

pub(crate) use approval_request::APPROVAL_REQUEST_COLUMNS;
pub(crate) use friendship::FRIENDSHIP_COLUMNS;
pub(crate) use invitation::INVITATION_COLUMNS;

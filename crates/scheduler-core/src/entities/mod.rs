//! Domain entities - core business objects

mod approval_request;
mod child;
mod delivery_log;
mod friendship;
mod invitation;
mod parent;

pub use approval_request::{ApprovalRequest, ApprovalRequestType, ApprovalStatus};
pub use child::Child;
pub use delivery_log::{DeliveryKind, DeliveryLog, DeliveryStatus};
pub use friendship::{Friendship, FriendshipSide, FriendshipStatus};
pub use invitation::{
    Invitation, InvitationStatus, RecipientInfo, SenderInfo, DEFAULT_INVITATION_TTL_DAYS,
    MAX_MESSAGE_LEN,
};
pub use parent::Parent;

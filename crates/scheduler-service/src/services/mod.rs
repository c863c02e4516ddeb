//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! call. Only the sweeper owns its context, since it outlives any request.

pub mod approval;
pub mod context;
pub mod error;
pub mod friendship;
pub mod hooks;
pub mod invitation;
pub mod profile;
pub mod sweeper;

pub use approval::{ApprovalService, RespondOutcome};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use friendship::FriendshipService;
pub use hooks::NotificationHooks;
pub use invitation::InvitationService;
pub use profile::ProfileService;
pub use sweeper::{ExpirySweeper, SweepReport, SweepSchedule};

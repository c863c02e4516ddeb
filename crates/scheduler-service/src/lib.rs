//! # scheduler-service
//!
//! Application layer: the friend-approval workflow, the expiry sweeper,
//! post-commit notification hooks, and DTOs.

pub mod bootstrap;
pub mod dto;
pub mod notifier;
pub mod services;

pub use bootstrap::build_context;
pub use dto::*;
pub use notifier::LogNotifier;
pub use services::{
    ApprovalService, ExpirySweeper, FriendshipService, InvitationService, NotificationHooks,
    ProfileService, RespondOutcome, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SweepReport, SweepSchedule,
};

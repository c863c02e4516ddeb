//! Route handlers
//!
//! HTTP request handlers organized by resource.

pub mod approvals;
pub mod children;
pub mod friendships;
pub mod health;
pub mod invitations;
pub mod parents;

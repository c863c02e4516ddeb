//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes sit at the root.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{approvals, children, friendships, health, invitations, parents};
use crate::state::AppState;

/// API router (health routes are separate so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(parent_routes())
        .merge(child_routes())
        .merge(invitation_routes())
        .merge(approval_routes())
        .merge(friendship_routes())
}

fn parent_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/parents/@me",
            get(parents::get_current_parent).put(parents::upsert_current_parent),
        )
        .route("/parents/@me/device-token", put(parents::register_device_token))
        .route("/parents/@me/invitations", get(parents::get_pending_invitations))
        .route(
            "/parents/@me/approval-requests",
            get(parents::get_pending_approval_requests),
        )
}

fn child_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/children",
            get(children::list_children).post(children::create_child),
        )
        .route("/children/:child_id", get(children::get_child))
        .route("/children/:child_id/invitations", get(children::get_sent_invitations))
        .route("/children/:child_id/friendships", get(children::get_friendships))
        .route("/children/:child_id/friends", get(children::get_friends))
}

fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route("/invitations", post(invitations::create_invitation))
        .route("/invitations/:invitation_id", get(invitations::get_invitation))
        .route("/invitations/:invitation_id/accept", post(invitations::accept_invitation))
        .route("/invitations/:invitation_id/decline", post(invitations::decline_invitation))
        .route("/invitations/:invitation_id/cancel", post(invitations::cancel_invitation))
}

fn approval_routes() -> Router<AppState> {
    Router::new().route(
        "/approval-requests/:request_id/respond",
        post(approvals::respond_to_approval_request),
    )
}

fn friendship_routes() -> Router<AppState> {
    Router::new()
        .route("/friendships/:friendship_id/pause", post(friendships::pause_friendship))
        .route("/friendships/:friendship_id/resume", post(friendships::resume_friendship))
        .route("/friendships/:friendship_id/block", post(friendships::block_friendship))
}

//! API integration tests
//!
//! Each test spawns its own server on the in-memory store. The backend test
//! at the bottom additionally needs DATABASE_URL and REDIS_URL.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, check_backend_env, env_config, fixtures::*, unique_suffix,
    TestServer,
};
use reqwest::StatusCode;

struct Family {
    token: String,
    email: String,
    child: ChildBody,
}

async fn family(server: &TestServer, parent_name: &str, child_name: &str) -> Family {
    let parent_id = format!("{}{}", parent_name.to_lowercase(), unique_suffix());
    let token = server.token_for(&parent_id).unwrap();

    let body = UpsertParentBody::unique(parent_name);
    let response = server.put_auth("/api/v1/parents/@me", &token, &body).await.unwrap();
    let parent: ParentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(parent.id, parent_id);

    let response = server
        .post_auth("/api/v1/children", &token, &CreateChildBody::named(child_name))
        .await
        .unwrap();
    let child: ChildBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(child.parent_id, parent_id);

    Family {
        token,
        email: parent.email,
        child,
    }
}

async fn pending_requests(server: &TestServer, family: &Family) -> Vec<ApprovalRequestBody> {
    let response = server
        .get_auth("/api/v1/parents/@me/approval-requests", &family.token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn invite(server: &TestServer, sender: &Family, recipient: &Family) -> InvitationBody {
    let body = CreateInvitationBody {
        child_id: sender.child.id.clone(),
        recipient_email: recipient.email.clone(),
        message: Some("Want to be friends?".to_string()),
    };
    let response = server.post_auth("/api/v1/invitations", &sender.token, &body).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn respond(
    server: &TestServer,
    family: &Family,
    request_id: &str,
    answer: &RespondBody,
) -> reqwest::Response {
    server
        .post_auth(
            &format!("/api/v1/approval-requests/{request_id}/respond"),
            &family.token,
            answer,
        )
        .await
        .unwrap()
}

async fn friends_of(server: &TestServer, family: &Family) -> Vec<ChildBody> {
    let response = server
        .get_auth(&format!("/api/v1/children/{}/friends", family.child.id), &family.token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_on_memory_store() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["redis"], "not_configured");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/parents/@me/approval-requests").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Workflow
// ============================================================================

#[tokio::test]
async fn test_invitation_to_friendship() {
    let server = TestServer::start().await.unwrap();
    let alice = family(&server, "Alice", "Ava").await;
    let bob = family(&server, "Bob", "Ben").await;

    // Sender's parent approves first
    let invitation = invite(&server, &alice, &bob).await;
    assert_eq!(invitation.status, "pendingSenderApproval");

    let requests = pending_requests(&server, &alice).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].request_type, "outgoing");
    assert_eq!(requests[0].invitation_id, invitation.id);

    let response = respond(&server, &alice, &requests[0].id, &APPROVE).await;
    let result: RespondResultBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.request.status, "approved");
    assert_eq!(result.invitation.status, "pendingRecipient");
    assert!(result.invitation.sender_parent_approved);
    assert!(result.friendship.is_none());

    // Recipient side sees it by email and accepts for Ben
    let response = server
        .get_auth("/api/v1/parents/@me/invitations", &bob.token)
        .await
        .unwrap();
    let waiting: Vec<InvitationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].id, invitation.id);

    let response = server
        .post_auth(
            &format!("/api/v1/invitations/{}/accept", invitation.id),
            &bob.token,
            &AcceptInvitationBody {
                child_id: bob.child.id.clone(),
            },
        )
        .await
        .unwrap();
    let accepted: InvitationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "pendingRecipientApproval");

    let requests = pending_requests(&server, &bob).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].request_type, "incoming");

    let response = server.get_auth("/api/v1/parents/@me", &bob.token).await.unwrap();
    let parent: ParentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(parent.pending_approval_count, 1);

    // Recipient's parent approves: friendship is created
    let response = respond(&server, &bob, &requests[0].id, &APPROVE).await;
    let result: RespondResultBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.invitation.status, "accepted");
    assert!(result.invitation.recipient_parent_approved);
    let friendship = result.friendship.expect("friendship created");
    assert_eq!(friendship.status, "active");
    assert_eq!(friendship.child1_id, alice.child.id);
    assert_eq!(friendship.child2_id, bob.child.id);

    let friends = friends_of(&server, &alice).await;
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].child_name, "Ben");
    assert!(pending_requests(&server, &bob).await.is_empty());

    // Answering twice is a state conflict
    let response = respond(&server, &bob, &requests[0].id, &APPROVE).await;
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "APPROVAL_REQUEST_NOT_PENDING");
}

#[tokio::test]
async fn test_friendship_controls() {
    let server = TestServer::start().await.unwrap();
    let alice = family(&server, "Alice", "Ava").await;
    let bob = family(&server, "Bob", "Ben").await;
    let carol = family(&server, "Carol", "Cal").await;

    let invitation = invite(&server, &alice, &bob).await;
    let outgoing = pending_requests(&server, &alice).await;
    respond(&server, &alice, &outgoing[0].id, &APPROVE).await;
    server
        .post_auth(
            &format!("/api/v1/invitations/{}/accept", invitation.id),
            &bob.token,
            &AcceptInvitationBody {
                child_id: bob.child.id.clone(),
            },
        )
        .await
        .unwrap();
    let incoming = pending_requests(&server, &bob).await;
    let response = respond(&server, &bob, &incoming[0].id, &APPROVE).await;
    let result: RespondResultBody = assert_json(response, StatusCode::OK).await.unwrap();
    let friendship_id = result.friendship.unwrap().id;
    let path = |action: &str| format!("/api/v1/friendships/{friendship_id}/{action}");

    // Pause hides the friend, resume brings them back
    let response = server.post_auth_empty(&path("pause"), &alice.token).await.unwrap();
    let paused: FriendshipBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(paused.status, "active");
    assert!(!paused.is_active);
    assert!(friends_of(&server, &bob).await.is_empty());

    let response = server.post_auth_empty(&path("resume"), &alice.token).await.unwrap();
    let resumed: FriendshipBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(resumed.is_active);
    assert_eq!(friends_of(&server, &bob).await.len(), 1);

    // Outsiders may not touch it
    let response = server.post_auth_empty(&path("block"), &carol.token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_FRIENDSHIP_PARENT");

    // Block wins over resume
    let response = server.post_auth_empty(&path("block"), &bob.token).await.unwrap();
    let blocked: FriendshipBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(blocked.status, "blocked");
    server.post_auth_empty(&path("resume"), &alice.token).await.unwrap();
    assert!(friends_of(&server, &alice).await.is_empty());

    let response = server
        .get_auth(&format!("/api/v1/children/{}/friendships", alice.child.id), &alice.token)
        .await
        .unwrap();
    let all: Vec<FriendshipBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, "blocked");
}

#[tokio::test]
async fn test_sender_parent_denies() {
    let server = TestServer::start().await.unwrap();
    let alice = family(&server, "Alice", "Ava").await;
    let bob = family(&server, "Bob", "Ben").await;

    invite(&server, &alice, &bob).await;
    let requests = pending_requests(&server, &alice).await;

    let response = respond(&server, &alice, &requests[0].id, &DENY).await;
    let result: RespondResultBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.request.status, "denied");
    assert_eq!(result.invitation.status, "deniedBySenderParent");

    // Nothing reaches the recipient
    let response = server
        .get_auth("/api/v1/parents/@me/invitations", &bob.token)
        .await
        .unwrap();
    let waiting: Vec<InvitationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(waiting.is_empty());
}

#[tokio::test]
async fn test_only_request_parent_may_respond() {
    let server = TestServer::start().await.unwrap();
    let alice = family(&server, "Alice", "Ava").await;
    let bob = family(&server, "Bob", "Ben").await;

    invite(&server, &alice, &bob).await;
    let requests = pending_requests(&server, &alice).await;

    let response = respond(&server, &bob, &requests[0].id, &APPROVE).await;
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_REQUEST_PARENT");

    let response = respond(&server, &alice, "no-such-request", &APPROVE).await;
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_APPROVAL_REQUEST");
}

#[tokio::test]
async fn test_cancelled_invitation_cannot_be_approved() {
    let server = TestServer::start().await.unwrap();
    let alice = family(&server, "Alice", "Ava").await;
    let bob = family(&server, "Bob", "Ben").await;

    let invitation = invite(&server, &alice, &bob).await;
    let requests = pending_requests(&server, &alice).await;
    let cancel = format!("/api/v1/invitations/{}/cancel", invitation.id);

    let response = server.post_auth_empty(&cancel, &bob.token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_INVITATION_SENDER");

    let response = server.post_auth_empty(&cancel, &alice.token).await.unwrap();
    let cancelled: InvitationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");

    let response = respond(&server, &alice, &requests[0].id, &APPROVE).await;
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "INVITATION_CLOSED");

    let response = server
        .get_auth(&format!("/api/v1/children/{}/invitations", alice.child.id), &alice.token)
        .await
        .unwrap();
    let sent: Vec<InvitationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].status, "cancelled");
}

#[tokio::test]
async fn test_invitation_rejects_bad_email_and_foreign_child() {
    let server = TestServer::start().await.unwrap();
    let alice = family(&server, "Alice", "Ava").await;
    let bob = family(&server, "Bob", "Ben").await;

    let body = CreateInvitationBody {
        child_id: alice.child.id.clone(),
        recipient_email: "not-an-email".to_string(),
        message: None,
    };
    let response = server.post_auth("/api/v1/invitations", &alice.token, &body).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let body = CreateInvitationBody {
        child_id: bob.child.id.clone(),
        recipient_email: "someone@example.com".to_string(),
        message: None,
    };
    let response = server.post_auth("/api/v1/invitations", &alice.token, &body).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_CHILD_PARENT");
}

#[tokio::test]
async fn test_device_token_registration() {
    let server = TestServer::start().await.unwrap();
    let alice = family(&server, "Alice", "Ava").await;

    let response = server
        .put_auth(
            "/api/v1/parents/@me/device-token",
            &alice.token,
            &serde_json::json!({ "deviceToken": "apns-token-1" }),
        )
        .await
        .unwrap();
    let parent: ParentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(parent.has_device_token);

    let response = server
        .put_auth(
            "/api/v1/parents/@me/device-token",
            &alice.token,
            &serde_json::json!({ "deviceToken": null }),
        )
        .await
        .unwrap();
    let parent: ParentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!parent.has_device_token);
}

// ============================================================================
// Real backends
// ============================================================================

#[tokio::test]
async fn test_health_ready_with_backends() {
    if !check_backend_env() {
        return;
    }

    let server = TestServer::start_with_config(env_config().unwrap())
        .await
        .expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

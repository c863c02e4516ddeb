//! Router tests driven through `tower::ServiceExt::oneshot` against the
//! in-memory store and the logging notifier.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use scheduler_api::{create_app, create_app_state};
use scheduler_common::{AppConfig, JwtService};
use scheduler_core::RecordId;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "routes-test-secret";

async fn app() -> Router {
    let config = AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some(SECRET.to_string()),
        "RATE_LIMIT_BURST" => Some("1000".to_string()),
        _ => None,
    })
    .unwrap();
    let state = create_app_state(config).await.unwrap();
    create_app(state).unwrap()
}

fn token_for(parent_id: &str) -> String {
    JwtService::new(SECRET, 900)
        .issue(&RecordId::parse(parent_id).unwrap(), None)
        .unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Parent profile plus one child; returns (token, child id)
async fn family(app: &Router, parent_id: &str, email: &str, child_name: &str) -> (String, String) {
    let token = token_for(parent_id);
    let (status, _) = send(
        app,
        Method::PUT,
        "/api/v1/parents/@me",
        Some(&token),
        Some(json!({ "email": email, "parentName": format!("{child_name}'s parent") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, child) = send(
        app,
        Method::POST,
        "/api/v1/children",
        Some(&token),
        Some(json!({ "childName": child_name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (token, child["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_health_probes() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "not_configured");
}

#[tokio::test]
async fn test_missing_and_bad_tokens_are_unauthorized() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/children", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");

    let forged = JwtService::new("other-secret", 900)
        .issue(&RecordId::parse("parentA").unwrap(), None)
        .unwrap();
    let (status, body) = send(&app, Method::GET, "/api/v1/children", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_AUTHORIZATION");
}

#[tokio::test]
async fn test_validation_errors_carry_details() {
    let app = app().await;
    let token = token_for("parentA");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/parents/@me",
        Some(&token),
        Some(json!({ "email": "not-an-email", "parentName": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["email"].is_array());
}

#[tokio::test]
async fn test_malformed_path_id_is_bad_request() {
    let app = app().await;
    let token = token_for("parentA");

    let (status, body) =
        send(&app, Method::GET, "/api/v1/children/a%20b", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_missing_parent_profile_is_not_found() {
    let app = app().await;
    let token = token_for("nobody");

    let (status, body) = send(&app, Method::GET, "/api/v1/parents/@me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "UNKNOWN_PARENT");
}

#[tokio::test]
async fn test_invitation_visible_only_to_parties() {
    let app = app().await;
    let (a_token, a_child) = family(&app, "parentA", "a@example.com", "Ava").await;
    let (b_token, _) = family(&app, "parentB", "b@example.com", "Ben").await;
    let (c_token, _) = family(&app, "parentC", "c@example.com", "Cal").await;

    let (status, invitation) = send(
        &app,
        Method::POST,
        "/api/v1/invitations",
        Some(&a_token),
        Some(json!({ "childId": a_child, "recipientEmail": "B@Example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invitation["status"], "pendingSenderApproval");
    assert_eq!(invitation["recipientEmail"], "b@example.com");
    let uri = format!("/api/v1/invitations/{}", invitation["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, Some(&a_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &uri, Some(&b_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &uri, Some(&c_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Declining is for the addressee only
    let (status, _) = send(&app, Method::POST, &format!("{uri}/decline"), Some(&c_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Nobody has approved the sender side yet
    let (status, body) =
        send(&app, Method::POST, &format!("{uri}/decline"), Some(&b_token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_INVITATION_STATE");
}

#[tokio::test]
async fn test_child_reads_require_ownership() {
    let app = app().await;
    let (_, a_child) = family(&app, "parentA", "a@example.com", "Ava").await;
    let (b_token, _) = family(&app, "parentB", "b@example.com", "Ben").await;

    for suffix in ["", "/invitations", "/friendships", "/friends"] {
        let uri = format!("/api/v1/children/{a_child}{suffix}");
        let (status, body) = send(&app, Method::GET, &uri, Some(&b_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["error"]["code"], "NOT_CHILD_PARENT");
    }
}

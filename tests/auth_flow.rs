//! End-to-end authentication flow against the real route table.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_bytes, body_json, test_app};
use ricemill_backend::auth::ACCESS_TOKEN_TTL_MINUTES;
use serde_json::json;

#[tokio::test]
async fn register_login_authenticated_request_logout() {
    let app = test_app();

    // Register.
    let response = app
        .request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "name": "A", "email": "a@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());

    // Login.
    let response = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap().to_string();

    // Authenticated request succeeds.
    let response = app.request("GET", "/auth/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "a@x.com");

    // Logout revokes the token.
    let response = app.request("POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The unexpired token is now rejected by the session gate.
    let response = app.request("GET", "/auth/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app();

    let payload = json!({ "name": "A", "email": "a@x.com", "password": "p" });
    let response = app
        .request("POST", "/auth/register", None, Some(payload.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request("POST", "/auth/register", None, Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_role_is_rejected_at_registration() {
    let app = test_app();

    let response = app
        .request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "name": "A",
                "email": "a@x.com",
                "password": "p",
                "role": "superuser",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_errors_do_not_distinguish_email_from_password() {
    let app = test_app();
    app.register_and_login("A", "a@x.com", "p").await;

    let unknown_email = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "ghost@x.com", "password": "p" })),
        )
        .await;
    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "wrong" })),
        )
        .await;

    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: no account enumeration through error text.
    assert_eq!(
        body_bytes(unknown_email).await,
        body_bytes(wrong_password).await
    );
}

#[tokio::test]
async fn logout_requires_a_header_but_not_a_valid_token() {
    let app = test_app();

    let response = app.request("POST", "/auth/logout", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage tokens are revoked unconditionally.
    let response = app
        .request("POST", "/auth/logout", Some("not-a-jwt"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Re-revoking the same token is a no-op.
    let response = app
        .request("POST", "/auth/logout", Some("not-a-jwt"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn session_gate_rejects_missing_expired_and_garbage_tokens() {
    let app = test_app();
    app.register_and_login("A", "a@x.com", "p").await;

    // Missing header.
    let response = app.request("GET", "/auth/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let response = app
        .request("GET", "/auth/me", Some("invalid.token.here"), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A correctly signed token past its TTL.
    let past = Utc::now() - Duration::minutes(ACCESS_TOKEN_TTL_MINUTES + 1);
    let expired = app.tokens.issue_at("a@x.com", past).unwrap();
    let response = app.request("GET", "/auth/me", Some(&expired), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A valid token whose subject has no user row.
    let orphan = app.tokens.issue("ghost@x.com").unwrap();
    let response = app.request("GET", "/auth/me", Some(&orphan), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn role_catalog_and_user_administration() {
    let app = test_app();
    let admin_token = app.register_and_login("Admin", "admin@x.com", "p").await;

    // Role catalog lists all four roles with permission sets.
    let response = app.request("GET", "/roles", Some(&admin_token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let catalog = body_json(response).await;
    assert_eq!(catalog.as_array().unwrap().len(), 4);
    assert_eq!(catalog[0]["role"], "admin");

    // Register a viewer and confirm they cannot administer users.
    let response = app
        .request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "name": "V",
                "email": "v@x.com",
                "password": "p",
                "role": "viewer",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let viewer = body_json(response).await;
    let viewer_id = viewer["user"]["id"].as_i64().unwrap();

    let viewer_token = app.login("v@x.com", "p").await;
    let response = app.request("GET", "/users", Some(&viewer_token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin promotes the viewer to operator.
    let response = app
        .request(
            "PUT",
            &format!("/users/{}/role", viewer_id),
            Some(&admin_token),
            Some(json!({ "role": "operator" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown role string and missing id both fail.
    let response = app
        .request(
            "PUT",
            &format!("/users/{}/role", viewer_id),
            Some(&admin_token),
            Some(json!({ "role": "czar" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            "/users/9999/role",
            Some(&admin_token),
            Some(json!({ "role": "viewer" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_is_public() {
    let app = test_app();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

//! Registration, verification codes, login, and session guards.

mod common;

use atelier_server::db::{codes, users};
use common::{admin_token, customer, send, test_app};
use http::StatusCode;
use serde_json::json;
use shared::models::OneTimeCode;
use shared::util::now_millis;

fn register_body(email: &str) -> serde_json::Value {
    json!({
        "name": "Maria",
        "email": email,
        "password": "Sup3r$ecret",
        "phone": "09170000000",
        "address_line": "12 Example St",
        "barangay": "San Isidro",
        "city": "Makati",
        "province": "Metro Manila",
        "zip": "1200",
        "country": "PH"
    })
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _state) = test_app(dir.path()).await;

    // No SMTP relay in tests: the first attempt persists the account and
    // then fails on the unconfigured mail service.
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(register_body("maria@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(register_body("maria@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn register_validates_payload() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _state) = test_app(dir.path()).await;

    let mut body = register_body("maria@example.com");
    body["password"] = json!("short");
    let (status, _) = send(&app, "POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_gates_on_verification_then_password() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;

    // Registered but unverified account
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(register_body("maria@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR); // mail unconfigured; user persisted

    let login = json!({ "email": "maria@example.com", "password": "Sup3r$ecret" });

    // Unverified: 403 even with the correct password
    let (status, _) = send(&app, "POST", "/api/auth/login", None, Some(login.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Verify directly, then the same login succeeds
    let user = users::find_by_email(&state.db, "maria@example.com")
        .await
        .unwrap()
        .unwrap();
    users::update(
        &state.db,
        user.id.as_deref().unwrap(),
        json!({ "verified": true }),
    )
    .await
    .unwrap();

    let (status, body) = send(&app, "POST", "/api/auth/login", None, Some(login)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    // Wrong password on a verified account
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "maria@example.com", "password": "Wrong$ecret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown email
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "Sup3r$ecret" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn one_time_code_is_single_use_and_expires() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let (user, _) = customer(&state, "maria@example.com").await;
    let user_id = user.id.clone().unwrap();

    // Live code accepted exactly once
    let challenge_id = format!("{user_id}-live");
    codes::create(
        &state.db,
        OneTimeCode {
            id: challenge_id.clone(),
            user_id: user_id.clone(),
            email: "maria@example.com".into(),
            code: "123456".into(),
            expires_at: now_millis() + 600_000,
            created_at: 0,
        },
    )
    .await
    .unwrap();

    let verify = json!({ "challenge_id": challenge_id, "code": "123456" });
    let (status, _) = send(&app, "POST", "/api/auth/verify", None, Some(verify.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/api/auth/verify", None, Some(verify)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Expired code is consumed on the failed check
    let expired_id = format!("{user_id}-expired");
    codes::create(
        &state.db,
        OneTimeCode {
            id: expired_id.clone(),
            user_id,
            email: "maria@example.com".into(),
            code: "654321".into(),
            expires_at: now_millis() - 1,
            created_at: 0,
        },
    )
    .await
    .unwrap();

    let verify = json!({ "challenge_id": expired_id, "code": "654321" });
    let (status, body) = send(&app, "POST", "/api/auth/verify", None, Some(verify.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Code expired");

    // Consumed: a retry now reports an invalid code
    let (status, body) = send(&app, "POST", "/api/auth/verify", None, Some(verify)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid code");
}

#[tokio::test]
async fn wrong_code_does_not_consume_challenge() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let (user, _) = customer(&state, "maria@example.com").await;
    let user_id = user.id.clone().unwrap();

    let challenge_id = format!("{user_id}-guess");
    codes::create(
        &state.db,
        OneTimeCode {
            id: challenge_id.clone(),
            user_id,
            email: "maria@example.com".into(),
            code: "123456".into(),
            expires_at: now_millis() + 600_000,
            created_at: 0,
        },
    )
    .await
    .unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/verify",
        None,
        Some(json!({ "challenge_id": challenge_id.clone(), "code": "000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Correct code still works afterwards
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/verify",
        None,
        Some(json!({ "challenge_id": challenge_id, "code": "123456" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn session_guards_and_cookie_transport() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let (_, token) = customer(&state, "maria@example.com").await;

    // No token
    let (status, _) = send(&app, "GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token
    let (status, _) = send(&app, "GET", "/api/orders", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Bearer header works
    let (status, _) = send(&app, "GET", "/api/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Cookie transport works for the same token
    use axum::body::Body;
    use tower::ServiceExt;
    let request = http::Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header(http::header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Customer token is not enough for admin routes
    let (status, _) = send(&app, "GET", "/api/admin/sales", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admin token is
    let admin = admin_token(&state).await;
    let (status, _) = send(&app, "GET", "/api/admin/sales", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn me_returns_sanitized_user() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path()).await;
    let (_, token) = customer(&state, "maria@example.com").await;

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "maria@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn oauth_routes_require_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _state) = test_app(dir.path()).await;

    let (status, _) = send(&app, "GET", "/api/auth/google", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

//! Shared harness for the HTTP integration tests
//!
//! Each test opens its own store under a temp directory and drives the
//! fully-layered router with oneshot requests.

use atelier_server::api;
use atelier_server::core::{AppState, Config};
use atelier_server::db::users;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{NewUser, Role, User};
use tower::ServiceExt;

pub fn test_config(dir: &std::path::Path) -> Config {
    Config {
        database_path: dir.join("store").to_string_lossy().into_owned(),
        database_ns: "test".into(),
        database_name: "test".into(),
        http_port: 0,
        environment: "development".into(),
        jwt_secret: "test-secret-not-for-production".into(),
        admin_email: "admin@atelier.test".into(),
        admin_password: "Admin123!".into(),
        client_origins: vec!["http://localhost:5173".into()],
        smtp_host: None,
        smtp_port: 587,
        smtp_username: None,
        smtp_password: None,
        smtp_from: "noreply@atelier.test".into(),
        google_client_id: None,
        google_client_secret: None,
        google_redirect_url: None,
    }
}

pub async fn test_app(dir: &std::path::Path) -> (Router, AppState) {
    let state = AppState::new(test_config(dir)).await.expect("app state");
    (api::create_router(state.clone()), state)
}

/// Fire one request and return status plus parsed JSON body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn token_for(state: &AppState, user_id: &str, role: Role) -> String {
    state.jwt.issue(user_id, role).expect("token")
}

/// Bearer token for the bootstrapped admin account
pub async fn admin_token(state: &AppState) -> String {
    let admin = users::find_by_email(&state.db, &state.config.admin_email)
        .await
        .expect("query admin")
        .expect("bootstrapped admin");
    token_for(state, admin.id.as_deref().unwrap(), Role::Admin)
}

/// Insert a verified customer and return (user, bearer token)
pub async fn customer(state: &AppState, email: &str) -> (User, String) {
    let user = users::create(
        &state.db,
        NewUser {
            name: "Maria".into(),
            email: email.into(),
            password_hash: String::new(),
            role: Role::Customer,
            verified: true,
            phone: "09170000000".into(),
            address_line: "12 Example St".into(),
            barangay: "San Isidro".into(),
            city: "Makati".into(),
            province: "Metro Manila".into(),
            zip: "1200".into(),
            country: "PH".into(),
        },
    )
    .await
    .expect("create customer");
    let token = token_for(state, user.id.as_deref().unwrap(), Role::Customer);
    (user, token)
}

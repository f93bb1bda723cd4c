//! Authentication endpoints: register, login, verify-code, OAuth,
//! logout, current-session lookup

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{NewUser, OneTimeCode, Role, UserPublic};
use shared::util::now_millis;
use validator::Validate;

use super::validate_payload;
use crate::auth::{CurrentUser, TOKEN_TTL_HOURS, generate_code, hash_password, verify_password};
use crate::core::AppState;
use crate::db::{codes, users};
use crate::oauth;

/// Code validity window (ten minutes)
const CODE_TTL_MILLIS: i64 = 10 * 60 * 1000;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", post(verify))
        .route("/api/auth/google", get(google_redirect))
        .route("/api/auth/google/callback", get(google_callback))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

// ── Cookie helpers ──

fn session_cookie(state: &AppState, token: &str) -> String {
    let max_age = TOKEN_TTL_HOURS * 3600;
    if state.config.is_production() {
        format!("token={token}; HttpOnly; Path=/; Max-Age={max_age}; SameSite=None; Secure")
    } else {
        format!("token={token}; HttpOnly; Path=/; Max-Age={max_age}; SameSite=Lax")
    }
}

fn clear_cookie(state: &AppState) -> String {
    if state.config.is_production() {
        "token=; HttpOnly; Path=/; Max-Age=0; SameSite=None; Secure".to_string()
    } else {
        "token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax".to_string()
    }
}

// ── POST /api/auth/register ──

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 7))]
    pub phone: String,
    #[serde(default)]
    pub address_line: String,
    #[validate(length(min = 2))]
    pub barangay: String,
    #[validate(length(min = 2))]
    pub city: String,
    #[validate(length(min = 2))]
    pub province: String,
    #[validate(length(min = 3))]
    pub zip: String,
    #[validate(length(min = 2))]
    pub country: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
    pub requires_verification: bool,
    pub challenge_id: String,
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validate_payload(&payload)?;

    let email = payload.email.trim().to_lowercase();
    if users::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = users::create(
        &state.db,
        NewUser {
            name: payload.name,
            email: email.clone(),
            password_hash,
            role: Role::Customer,
            verified: false,
            phone: payload.phone,
            address_line: payload.address_line,
            barangay: payload.barangay,
            city: payload.city,
            province: payload.province,
            zip: payload.zip,
            country: payload.country,
        },
    )
    .await?;

    // The account exists unverified from here on; without a relay the
    // client is told the mail service is down and can retry later.
    let Some(mailer) = state.mailer.clone() else {
        return Err(AppError::new(ErrorCode::MailNotConfigured));
    };

    let user_id = user.id.clone().unwrap_or_default();
    let code = generate_code();
    let challenge = codes::create(
        &state.db,
        OneTimeCode {
            id: format!("{user_id}-{}", now_millis()),
            user_id: user_id.clone(),
            email: email.clone(),
            code: code.clone(),
            expires_at: now_millis() + CODE_TTL_MILLIS,
            created_at: 0,
        },
    )
    .await?;

    mailer.send_verification_code(&email, &code).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user_id,
            email,
            requires_verification: true,
            challenge_id: challenge.id,
        }),
    ))
}

// ── POST /api/auth/login ──

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub requires_2fa: bool,
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(AppendHeaders<[(http::HeaderName, String); 1]>, Json<LoginResponse>)> {
    validate_payload(&payload)?;

    let email = payload.email.trim().to_lowercase();
    let user = users::find_by_email(&state.db, &email)
        .await?
        .filter(|u| !u.password_hash.is_empty())
        .ok_or_else(|| AppError::with_message(ErrorCode::NotFound, "Email not found"))?;

    if !user.verified && !user.role.is_admin() {
        return Err(AppError::new(ErrorCode::EmailNotVerified));
    }

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }

    let user_id = user.id.clone().unwrap_or_default();
    let token = state.jwt.issue(&user_id, user.role)?;
    tracing::info!(user_id = %user_id, "login succeeded");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&state, &token))]),
        Json(LoginResponse {
            token,
            requires_2fa: false,
        }),
    ))
}

// ── POST /api/auth/verify ──

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 8))]
    pub challenge_id: String,
    #[validate(length(min = 6))]
    pub code: String,
}

async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    validate_payload(&payload)?;

    let entry = codes::find_by_id(&state.db, &payload.challenge_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VerificationCodeInvalid))?;

    if entry.is_expired(now_millis()) {
        codes::consume(&state.db, &payload.challenge_id).await?;
        return Err(AppError::new(ErrorCode::VerificationCodeExpired));
    }
    if entry.code != payload.code {
        return Err(AppError::new(ErrorCode::VerificationCodeInvalid));
    }
    codes::consume(&state.db, &payload.challenge_id).await?;

    users::find_by_id(&state.db, &entry.user_id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::NotFound, "User not found"))?;
    users::update(
        &state.db,
        &entry.user_id,
        serde_json::json!({ "verified": true }),
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

// ── GET /api/auth/google ──

async fn google_redirect(State(state): State<AppState>) -> AppResult<Redirect> {
    let (client_id, _, redirect_url) = state
        .config
        .google_oauth()
        .ok_or_else(|| AppError::new(ErrorCode::OauthNotConfigured))?;
    let url = oauth::authorize_url(client_id, redirect_url)?;
    Ok(Redirect::temporary(&url))
}

// ── GET /api/auth/google/callback ──

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<(AppendHeaders<[(http::HeaderName, String); 1]>, Redirect)> {
    let (client_id, client_secret, redirect_url) = state
        .config
        .google_oauth()
        .ok_or_else(|| AppError::new(ErrorCode::OauthNotConfigured))?;

    let access_token = oauth::exchange_code(
        &state.http,
        client_id,
        client_secret,
        redirect_url,
        &query.code,
    )
    .await?;
    let profile = oauth::fetch_profile(&state.http, &access_token).await?;

    let email = profile.email.trim().to_lowercase();
    let user = match users::find_by_email(&state.db, &email).await? {
        Some(existing) => {
            if !existing.verified {
                users::update(
                    &state.db,
                    existing.id.as_deref().unwrap_or_default(),
                    serde_json::json!({ "verified": true }),
                )
                .await?;
            }
            existing
        }
        None => {
            // First OAuth login creates a pre-verified, password-less account
            users::create(
                &state.db,
                NewUser {
                    name: profile.name.unwrap_or_else(|| "Google User".to_string()),
                    email,
                    password_hash: String::new(),
                    role: Role::Customer,
                    verified: true,
                    phone: String::new(),
                    address_line: String::new(),
                    barangay: String::new(),
                    city: String::new(),
                    province: String::new(),
                    zip: String::new(),
                    country: String::new(),
                },
            )
            .await?
        }
    };

    let user_id = user.id.clone().unwrap_or_default();
    let token = state.jwt.issue(&user_id, user.role)?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&state, &token))]),
        Redirect::temporary(state.config.primary_client_origin()),
    ))
}

// ── POST /api/auth/logout ──

async fn logout(State(state): State<AppState>) -> (AppendHeaders<[(http::HeaderName, String); 1]>, Json<ApiResponse<()>>) {
    (
        AppendHeaders([(SET_COOKIE, clear_cookie(&state))]),
        Json(ApiResponse::ok()),
    )
}

// ── GET /api/auth/me ──

async fn me(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<UserPublic>> {
    let user = users::find_by_id(&state.db, &user.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;
    Ok(Json(user.sanitized()))
}

//! Profile handlers: self-service account management

use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{UserProfileUpdate, UserPublic};
use validator::Validate;

use super::validate_payload;
use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::AppState;
use crate::db::users;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(me).patch(update_profile))
        .route("/api/users/password", patch(change_password))
        .route("/api/users/theme", patch(set_theme))
}

/// GET /api/users/me
async fn me(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<UserPublic>> {
    let user = users::find_by_id(&state.db, &user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(user.sanitized()))
}

/// PATCH /api/users/me — profile update, rebuilds the joined address
async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UserProfileUpdate>,
) -> AppResult<Json<UserPublic>> {
    validate_payload(&payload)?;

    let address = payload.joined_address();
    let mut merge = serde_json::json!({
        "name": payload.name,
        "email": payload.email,
        "phone": payload.phone,
        "address_line": payload.address_line,
        "barangay": payload.barangay,
        "city": payload.city,
        "province": payload.province,
        "zip": payload.zip,
        "country": payload.country,
        "backup_address": payload.backup_address,
        "profile_image": payload.profile_image,
        "address": address,
    });
    if let Some(theme) = payload.preferred_theme {
        merge["preferred_theme"] = serde_json::Value::String(theme);
    }

    let updated = users::update(&state.db, &user.id, merge)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(updated.sanitized()))
}

// ── PATCH /api/users/password ──

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 8))]
    pub current_password: String,
    #[validate(length(min = 8), custom(function = password_strength))]
    pub new_password: String,
}

/// New passwords need a letter, a digit, and a symbol
fn password_strength(password: &str) -> Result<(), validator::ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());
    if has_letter && has_digit && has_symbol {
        Ok(())
    } else {
        Err(validator::ValidationError::new("password_strength"))
    }
}

async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<PasswordChange>,
) -> AppResult<Json<ApiResponse<()>>> {
    validate_payload(&payload)?;

    let stored = users::find_by_id(&state.db, &user.id)
        .await?
        .filter(|u| !u.password_hash.is_empty())
        .ok_or_else(|| AppError::not_found("User"))?;

    if !verify_password(&payload.current_password, &stored.password_hash) {
        return Err(AppError::new(ErrorCode::PasswordIncorrect));
    }

    let password_hash = hash_password(&payload.new_password)?;
    users::update(
        &state.db,
        &user.id,
        serde_json::json!({ "password_hash": password_hash }),
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

// ── PATCH /api/users/theme ──

#[derive(Debug, Deserialize, Validate)]
pub struct ThemeUpdate {
    #[validate(length(min = 1))]
    pub preferred_theme: String,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub preferred_theme: String,
}

async fn set_theme(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ThemeUpdate>,
) -> AppResult<Json<ThemeResponse>> {
    validate_payload(&payload)?;

    let updated = users::update(
        &state.db,
        &user.id,
        serde_json::json!({ "preferred_theme": payload.preferred_theme }),
    )
    .await?
    .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(ThemeResponse {
        preferred_theme: updated.preferred_theme,
    }))
}

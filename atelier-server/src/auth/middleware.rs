//! Session guards
//!
//! `require_auth` validates the signed session token (bearer header or
//! httponly `token` cookie, interchangeably) and injects
//! [`CurrentUser`] into the request extensions. `require_admin`
//! additionally compares the role claim.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::auth::{CurrentUser, JwtService};
use crate::core::AppState;

/// Pull the session token from the bearer header or the `token` cookie
fn extract_token(headers: &http::HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
    {
        return Some(token.to_string());
    }
    let cookies = headers.get(http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "token" && !value.is_empty()).then(|| value.to_string())
    })
}

/// Require authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight never carries credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = extract_token(req.headers()).ok_or_else(AppError::unauthorized)?;
    let claims = state.jwt.validate(&token).map_err(|e| {
        tracing::warn!(uri = %req.uri(), "auth failed: {}", e.message);
        e
    })?;

    req.extensions_mut().insert(CurrentUser::from(claims));
    Ok(next.run(req).await)
}

/// Require admin role middleware; runs behind `require_auth`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;
    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, uri = %req.uri(), "admin access denied");
        return Err(AppError::forbidden("Forbidden"));
    }
    Ok(next.run(req).await)
}

/// Extractor for handlers running behind `require_auth`
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Populated by the middleware on guarded routes
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        // Unguarded routes (e.g. /api/auth/me) validate directly
        let token = extract_token(&parts.headers).ok_or_else(AppError::unauthorized)?;
        let claims = state.jwt.validate(&token)?;
        let user = CurrentUser::from(claims);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

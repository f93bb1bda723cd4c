//! JWT session tokens
//!
//! Fixed two-hour lifetime, non-refreshing; expiry forces
//! re-authentication.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::models::Role;

/// Token lifetime in hours
pub const TOKEN_TTL_HOURS: i64 = 2;

/// Claims stored in the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    /// Role claim compared by the admin guard
    pub role: Role,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity injected into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// JWT signing/validation service
#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for the given user
    pub fn issue(&self, user_id: &str, role: Role) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: (now + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "JWT creation failed");
            AppError::internal(format!("JWT creation failed: {e}"))
        })
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::token_expired(),
                _ => AppError::invalid_token(),
            })
    }

    /// Pull the token out of an `Authorization: Bearer ...` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn issue_and_validate_roundtrip() {
        let service = JwtService::new("test-secret");
        let token = service.issue("user123", Role::Customer).expect("issue");
        let claims = service.validate(&token).expect("validate");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(
            claims.exp - claims.iat,
            (TOKEN_TTL_HOURS * 3600) as usize
        );
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = JwtService::new("secret-a")
            .issue("user123", Role::Admin)
            .expect("issue");
        let err = JwtService::new("secret-b").validate(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}

//! Google OAuth code flow via the REST API (no SDK dependency)

use serde_json::Value;
use shared::error::{AppError, ErrorCode};

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Profile fields we use from the userinfo endpoint
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub email: String,
    pub name: Option<String>,
}

/// Build the browser redirect target for the consent screen
pub fn authorize_url(client_id: &str, redirect_url: &str) -> Result<String, AppError> {
    let url = reqwest::Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_url),
            ("response_type", "code"),
            ("scope", "openid email profile"),
        ],
    )
    .map_err(|e| AppError::internal(format!("OAuth URL build failed: {e}")))?;
    Ok(url.into())
}

/// Exchange the callback code for an access token
pub async fn exchange_code(
    http: &reqwest::Client,
    client_id: &str,
    client_secret: &str,
    redirect_url: &str,
    code: &str,
) -> Result<String, AppError> {
    let resp: Value = http
        .post(TOKEN_URL)
        .form(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_url),
            ("grant_type", "authorization_code"),
            ("code", code),
        ])
        .send()
        .await
        .map_err(oauth_err)?
        .json()
        .await
        .map_err(oauth_err)?;

    resp["access_token"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InternalError,
                format!("Google token exchange failed: {resp}"),
            )
        })
}

/// Fetch the authenticated user's profile
pub async fn fetch_profile(
    http: &reqwest::Client,
    access_token: &str,
) -> Result<GoogleProfile, AppError> {
    let resp: Value = http
        .get(USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(oauth_err)?
        .json()
        .await
        .map_err(oauth_err)?;

    let email = resp["email"].as_str().map(String::from).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InternalError,
            format!("Google userinfo missing email: {resp}"),
        )
    })?;

    Ok(GoogleProfile {
        email,
        name: resp["name"].as_str().map(String::from),
    })
}

fn oauth_err(e: reqwest::Error) -> AppError {
    AppError::with_message(ErrorCode::InternalError, format!("Google OAuth request failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_params() {
        let url = authorize_url("client-1", "http://localhost:4000/api/auth/google/callback")
            .expect("url");
        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=openid+email+profile") || url.contains("scope=openid%20email%20profile"));
    }
}

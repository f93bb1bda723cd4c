//! Server configuration
//!
//! All values come from environment variables (a `.env` file is loaded
//! by `main` before this runs). Secrets must be set outside the
//! development environment.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// RocksDB data directory
    pub database_path: String,
    /// SurrealDB namespace
    pub database_ns: String,
    /// SurrealDB database name
    pub database_name: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Bootstrap admin credentials
    pub admin_email: String,
    pub admin_password: String,
    /// CORS allow-list (comma-separated origins)
    pub client_origins: Vec<String>,
    /// SMTP relay; mail sending is disabled when host or credentials are absent
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: String,
    /// Google OAuth client; the OAuth routes answer 500 when unset
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_redirect_url: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn optional(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|s| !s.is_empty())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let client_origins = std::env::var("CLIENT_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/atelier.db".into()),
            database_ns: std::env::var("DATABASE_NS").unwrap_or_else(|_| "atelier".into()),
            database_name: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "store".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@atelier.example".into()),
            admin_password: Self::require_secret("ADMIN_PASSWORD", &environment)?,
            client_origins,
            smtp_host: Self::optional("SMTP_HOST"),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_username: Self::optional("SMTP_USERNAME"),
            smtp_password: Self::optional("SMTP_PASSWORD"),
            smtp_from: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@atelier.example".into()),
            google_client_id: Self::optional("GOOGLE_CLIENT_ID"),
            google_client_secret: Self::optional("GOOGLE_CLIENT_SECRET"),
            google_redirect_url: Self::optional("GOOGLE_REDIRECT_URL"),
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Front-end origin used for OAuth redirects (first allow-list entry)
    pub fn primary_client_origin(&self) -> &str {
        self.client_origins
            .first()
            .map(String::as_str)
            .unwrap_or("http://localhost:5173")
    }

    /// Google OAuth client settings, when fully configured
    pub fn google_oauth(&self) -> Option<(&str, &str, &str)> {
        match (
            self.google_client_id.as_deref(),
            self.google_client_secret.as_deref(),
            self.google_redirect_url.as_deref(),
        ) {
            (Some(id), Some(secret), Some(redirect)) => Some((id, secret, redirect)),
            _ => None,
        }
    }
}

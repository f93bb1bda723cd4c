//! Application state
//!
//! The database handle is constructed explicitly here and injected
//! into accessors by reference; there is no process-global connection
//! and tests build their own state over a temp-dir store.

use std::sync::Arc;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, RateLimiter, hash_password};
use crate::core::Config;
use crate::db::{self, DbService};
use crate::email::Mailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// JWT session service
    pub jwt: Arc<JwtService>,
    /// SMTP relay; `None` when unconfigured
    pub mailer: Option<Mailer>,
    /// Global per-IP request limiter
    pub rate_limiter: RateLimiter,
    /// Outbound HTTP client (Google OAuth)
    pub http: reqwest::Client,
}

impl AppState {
    /// Create the state: open the store, run startup seeding, wire services
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::new(
            &config.database_path,
            &config.database_ns,
            &config.database_name,
        )
        .await?;
        Self::with_db(config, db_service).await
    }

    /// Build state over an already-open store (tests use a temp directory)
    pub async fn with_db(config: Config, db_service: DbService) -> Result<Self, AppError> {
        let db = db_service.db;

        // Startup seeding: admin bootstrap, starter catalog, banner singletons
        let admin_hash = hash_password(&config.admin_password)?;
        db::users::ensure_admin(&db, &config.admin_email, admin_hash).await?;
        db::products::ensure_seeded(&db).await?;
        db::banners::ensure_defaults(&db).await?;

        let mailer = Mailer::from_config(&config);
        if mailer.is_none() {
            tracing::warn!("SMTP relay not configured; verification email is disabled");
        }

        Ok(Self {
            jwt: Arc::new(JwtService::new(&config.jwt_secret)),
            db,
            mailer,
            rate_limiter: RateLimiter::new(),
            http: reqwest::Client::new(),
            config,
        })
    }
}

//! Database Module
//!
//! Owns the embedded SurrealDB handle and the per-entity accessor
//! modules. Accessors are thin pass-throughs: key lookups, default-fill
//! inserts with a `created_at` stamp, field-level merges, unconditional
//! deletes. No caching, no pagination.

pub mod banners;
pub mod carts;
pub mod codes;
pub mod feedback;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod sales;
pub mod users;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Database service — owns the embedded SurrealDB handle
///
/// Constructed once in `main` and handed to [`crate::core::AppState`];
/// accessors receive the handle by reference (no process-global state,
/// tests build their own instance against a temp directory).
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed store and select ns/db
    pub async fn new(path: &str, ns: &str, dbname: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(ns)
            .use_db(dbname)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path, ns, db = dbname, "Database connection established");

        Ok(Self { db })
    }
}

/// Map a driver error onto the unified database error
pub(crate) fn db_err(e: surrealdb::Error) -> AppError {
    AppError::database(e.to_string())
}

/// Fresh record key for app-generated ids
pub(crate) fn new_record_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

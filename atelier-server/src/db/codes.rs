//! One-time code accessors
//!
//! Codes are single-use: consumed (deleted) on the first successful or
//! expired check.

use shared::error::AppResult;
use shared::models::OneTimeCode;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::db_err;

const CODE_TABLE: &str = "one_time_code";

pub async fn find_by_id(db: &Surreal<Db>, id: &str) -> AppResult<Option<OneTimeCode>> {
    let code: Option<OneTimeCode> = db
        .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", CODE_TABLE))
        .bind(("id", id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(code)
}

pub async fn create(db: &Surreal<Db>, mut entry: OneTimeCode) -> AppResult<OneTimeCode> {
    entry.created_at = now_millis();
    db.query("CREATE type::thing($tb, $id) CONTENT $data")
        .bind(("tb", CODE_TABLE))
        .bind(("id", entry.id.clone()))
        .bind(("data", entry.clone()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;
    Ok(entry)
}

/// Delete the challenge regardless of outcome
pub async fn consume(db: &Surreal<Db>, id: &str) -> AppResult<()> {
    db.query("DELETE type::thing($tb, $id)")
        .bind(("tb", CODE_TABLE))
        .bind(("id", id.to_string()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;
    Ok(())
}

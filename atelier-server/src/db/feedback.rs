//! Feedback accessors

use shared::error::AppResult;
use shared::models::Feedback;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{db_err, new_record_key};

const FEEDBACK_TABLE: &str = "feedback";

/// All feedback entries, newest first
pub async fn find_all(db: &Surreal<Db>) -> AppResult<Vec<Feedback>> {
    let entries: Vec<Feedback> = db
        .query("SELECT *, record::id(id) AS id FROM feedback ORDER BY created_at DESC")
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(entries)
}

pub async fn create(db: &Surreal<Db>, mut entry: Feedback) -> AppResult<Feedback> {
    let id = new_record_key();
    entry.id = None;
    entry.created_at = now_millis();

    db.query("CREATE type::thing($tb, $id) CONTENT $data")
        .bind(("tb", FEEDBACK_TABLE))
        .bind(("id", id.clone()))
        .bind(("data", entry.clone()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;

    Ok(Feedback {
        id: Some(id),
        ..entry
    })
}

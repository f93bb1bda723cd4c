//! Sales ledger accessors
//!
//! Entries are appended by the checkout transaction (see
//! `db::orders::create_with_sale`) and only ever read back in aggregate.

use serde::Deserialize;
use shared::error::AppResult;
use shared::models::SalesSummary;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::db_err;

pub async fn summary(db: &Surreal<Db>) -> AppResult<SalesSummary> {
    #[derive(Deserialize)]
    struct Row {
        count: i64,
        revenue: f64,
    }
    let row: Option<Row> = db
        .query("SELECT count() AS count, math::sum(total) AS revenue FROM sale GROUP ALL")
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(row
        .map(|r| SalesSummary {
            count: r.count,
            revenue: r.revenue,
        })
        .unwrap_or(SalesSummary {
            count: 0,
            revenue: 0.0,
        }))
}

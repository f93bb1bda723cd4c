//! Review accessors

use shared::error::AppResult;
use shared::models::Review;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{db_err, new_record_key};

const REVIEW_TABLE: &str = "review";

/// Reviews for one product, newest first
pub async fn find_by_product(db: &Surreal<Db>, product_id: &str) -> AppResult<Vec<Review>> {
    let reviews: Vec<Review> = db
        .query("SELECT *, record::id(id) AS id FROM review WHERE product_id = $product ORDER BY created_at DESC")
        .bind(("product", product_id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(reviews)
}

pub async fn find_by_id(db: &Surreal<Db>, id: &str) -> AppResult<Option<Review>> {
    let review: Option<Review> = db
        .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", REVIEW_TABLE))
        .bind(("id", id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(review)
}

pub async fn create(db: &Surreal<Db>, mut review: Review) -> AppResult<Review> {
    let id = new_record_key();
    review.id = None;
    review.created_at = now_millis();

    db.query("CREATE type::thing($tb, $id) CONTENT $data")
        .bind(("tb", REVIEW_TABLE))
        .bind(("id", id.clone()))
        .bind(("data", review.clone()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;

    Ok(Review {
        id: Some(id),
        ..review
    })
}

/// Unconditional delete; returns the removed document
pub async fn remove(db: &Surreal<Db>, id: &str) -> AppResult<Option<Review>> {
    let review = find_by_id(db, id).await?;
    if review.is_some() {
        db.query("DELETE type::thing($tb, $id)")
            .bind(("tb", REVIEW_TABLE))
            .bind(("id", id.to_string()))
            .await
            .map_err(db_err)?
            .check()
            .map_err(db_err)?;
    }
    Ok(review)
}

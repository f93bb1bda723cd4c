//! Cart accessors
//!
//! One cart per user; the owning user id is the record key, and the
//! item list is replaced wholesale on every update.

use shared::error::AppResult;
use shared::models::{Cart, CartItem};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::db_err;

const CART_TABLE: &str = "cart";

pub async fn find_by_user(db: &Surreal<Db>, user_id: &str) -> AppResult<Option<Cart>> {
    let cart: Option<Cart> = db
        .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $user)")
        .bind(("tb", CART_TABLE))
        .bind(("user", user_id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(cart)
}

pub async fn create(db: &Surreal<Db>, user_id: &str) -> AppResult<Cart> {
    let cart = Cart {
        id: None,
        user_id: user_id.to_string(),
        items: Vec::new(),
        created_at: now_millis(),
    };
    db.query("CREATE type::thing($tb, $user) CONTENT $data")
        .bind(("tb", CART_TABLE))
        .bind(("user", user_id.to_string()))
        .bind(("data", cart.clone()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;
    Ok(Cart {
        id: Some(user_id.to_string()),
        ..cart
    })
}

/// Replace the item list wholesale
pub async fn update(db: &Surreal<Db>, user_id: &str, items: Vec<CartItem>) -> AppResult<Option<Cart>> {
    let cart: Option<Cart> = db
        .query("UPDATE type::thing($tb, $user) SET items = $items; SELECT *, record::id(id) AS id FROM type::thing($tb, $user)")
        .bind(("tb", CART_TABLE))
        .bind(("user", user_id.to_string()))
        .bind(("items", items))
        .await
        .map_err(db_err)?
        .take(1)
        .map_err(db_err)?;
    Ok(cart)
}

pub async fn remove_by_user(db: &Surreal<Db>, user_id: &str) -> AppResult<()> {
    db.query("DELETE type::thing($tb, $user)")
        .bind(("tb", CART_TABLE))
        .bind(("user", user_id.to_string()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;
    Ok(())
}

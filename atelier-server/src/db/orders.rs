//! Order accessors
//!
//! The two multi-document writes of the order lifecycle, checkout
//! (order insert + sale ledger append) and verification (stock
//! decrements + status flip), each run inside a single store
//! transaction, so a failure partway leaves nothing behind.

use shared::error::AppResult;
use shared::models::{Order, OrderItem, OrderStatus, Sale};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{db_err, new_record_key};

const ORDER_TABLE: &str = "order";

/// All orders, newest first
pub async fn find_all(db: &Surreal<Db>) -> AppResult<Vec<Order>> {
    let orders: Vec<Order> = db
        .query("SELECT *, record::id(id) AS id FROM order ORDER BY created_at DESC")
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(orders)
}

/// One user's orders, newest first
pub async fn find_by_user(db: &Surreal<Db>, user_id: &str) -> AppResult<Vec<Order>> {
    let orders: Vec<Order> = db
        .query("SELECT *, record::id(id) AS id FROM order WHERE user_id = $user ORDER BY created_at DESC")
        .bind(("user", user_id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(orders)
}

pub async fn find_by_id(db: &Surreal<Db>, id: &str) -> AppResult<Option<Order>> {
    let order: Option<Order> = db
        .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", ORDER_TABLE))
        .bind(("id", id.to_string()))
        .await
        .map_err(db_err)?
        .take(0)
        .map_err(db_err)?;
    Ok(order)
}

/// Checkout write: insert the order and append the sale ledger entry
/// in one transaction.
pub async fn create_with_sale(db: &Surreal<Db>, mut order: Order) -> AppResult<Order> {
    let order_id = new_record_key();
    let sale_id = new_record_key();
    order.id = None;
    order.created_at = now_millis();
    let sale = Sale {
        id: None,
        order_id: order_id.clone(),
        total: order.total,
        created_at: order.created_at,
    };

    db.query(
        "BEGIN TRANSACTION; \
         CREATE type::thing('order', $oid) CONTENT $order; \
         CREATE type::thing('sale', $sid) CONTENT $sale; \
         COMMIT TRANSACTION;",
    )
    .bind(("oid", order_id.clone()))
    .bind(("order", order.clone()))
    .bind(("sid", sale_id))
    .bind(("sale", sale))
    .await
    .map_err(db_err)?
    .check()
    .map_err(db_err)?;

    Ok(Order {
        id: Some(order_id),
        ..order
    })
}

/// Pass-through status write; legality is checked by the caller
pub async fn update_status(
    db: &Surreal<Db>,
    id: &str,
    status: OrderStatus,
) -> AppResult<Option<Order>> {
    let order: Option<Order> = db
        .query("UPDATE type::thing($tb, $id) SET status = $status; SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
        .bind(("tb", ORDER_TABLE))
        .bind(("id", id.to_string()))
        .bind(("status", status))
        .await
        .map_err(db_err)?
        .take(1)
        .map_err(db_err)?;
    Ok(order)
}

/// Verification write: decrement stock for every line item and flip the
/// order to `To Ship`, all in one transaction.
pub async fn commit_verification(
    db: &Surreal<Db>,
    id: &str,
    items: &[OrderItem],
) -> AppResult<Option<Order>> {
    let mut sql = String::from("BEGIN TRANSACTION; ");
    for index in 0..items.len() {
        sql.push_str(&format!(
            "UPDATE type::thing('product', $p{index}) SET stock -= $q{index}; "
        ));
    }
    sql.push_str("UPDATE type::thing('order', $order) SET status = $status; COMMIT TRANSACTION;");

    let mut query = db.query(sql);
    for (index, item) in items.iter().enumerate() {
        query = query
            .bind((format!("p{index}"), item.product_id.clone()))
            .bind((format!("q{index}"), item.quantity));
    }
    query
        .bind(("order", id.to_string()))
        .bind(("status", OrderStatus::ToShip))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;

    find_by_id(db, id).await
}

/// Delete all of a user's orders; returns the removed documents
pub async fn remove_by_user(db: &Surreal<Db>, user_id: &str) -> AppResult<Vec<Order>> {
    let removed = find_by_user(db, user_id).await?;
    db.query("DELETE order WHERE user_id = $user")
        .bind(("user", user_id.to_string()))
        .await
        .map_err(db_err)?
        .check()
        .map_err(db_err)?;
    Ok(removed)
}

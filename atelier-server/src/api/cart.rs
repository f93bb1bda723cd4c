//! Cart handlers
//!
//! One cart per user, fetched-or-created on read and replaced
//! wholesale on write. Merge logic lives in the client.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Cart, CartUpdate};

use super::validate_payload;
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::{carts, products};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/cart", get(get_cart).put(put_cart))
}

/// GET /api/cart
async fn get_cart(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<Cart>> {
    let cart = match carts::find_by_user(&state.db, &user.id).await? {
        Some(cart) => cart,
        None => carts::create(&state.db, &user.id).await?,
    };
    Ok(Json(cart))
}

/// PUT /api/cart
async fn put_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CartUpdate>,
) -> AppResult<Json<Cart>> {
    validate_payload(&payload)?;

    for item in &payload.items {
        let product = products::find_by_id(&state.db, &item.product_id).await?;
        if let Some(product) = product
            && item.quantity > product.stock
        {
            return Err(AppError::new(ErrorCode::QuantityExceedsStock)
                .with_detail("product_id", item.product_id.clone()));
        }
    }

    let cart = carts::update(&state.db, &user.id, payload.items)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CartNotFound))?;
    Ok(Json(cart))
}

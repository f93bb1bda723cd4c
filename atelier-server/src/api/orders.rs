//! Order handlers
//!
//! Every status write (customer cancel, admin patch, verify, soft
//! delete) goes through `OrderStatus::can_transition_to`, so no entry
//! point can take an order through an illegal lifecycle step.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderCreate, OrderStatus};

use super::validate_payload;
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::{orders, products};

/// Per-item quantity cap on checkout
const MAX_ITEM_QUANTITY: i32 = 100;

pub fn customer_router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list).post(create))
        .route("/api/orders/{id}/cancel", patch(cancel))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/api/orders/{id}/status", patch(set_status))
        .route("/api/orders/{id}/verify", patch(verify))
        .route("/api/orders/{id}", delete(remove))
}

/// GET /api/orders — own orders; all orders for admin
async fn list(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<Vec<Order>>> {
    let orders = if user.is_admin() {
        orders::find_all(&state.db).await?
    } else {
        orders::find_by_user(&state.db, &user.id).await?
    };
    Ok(Json(orders))
}

/// POST /api/orders — checkout
///
/// Stock is checked here but committed only at verification; COD has
/// no payment capture to confirm intent, so reservation waits for the
/// manual verify step.
async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    validate_payload(&payload)?;

    if payload.items.iter().any(|i| i.quantity > MAX_ITEM_QUANTITY) {
        return Err(AppError::new(ErrorCode::QuantityLimitExceeded));
    }
    for item in &payload.items {
        let product = products::find_by_id(&state.db, &item.product_id).await?;
        if let Some(product) = product
            && item.quantity > product.stock
        {
            return Err(AppError::new(ErrorCode::QuantityExceedsStock)
                .with_detail("product_id", item.product_id.clone()));
        }
    }

    let total = Order::compute_total(&payload.items);
    let order = orders::create_with_sale(
        &state.db,
        Order {
            id: None,
            user_id: user.id,
            items: payload.items,
            address: payload.address,
            contact_name: payload.contact_name,
            phone: payload.phone,
            email: payload.email,
            payment_method: payload.payment_method,
            total,
            status: OrderStatus::PendingCod,
            created_at: 0,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// PATCH /api/orders/{id}/cancel — owner only, `Pending COD` only
async fn cancel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = orders::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if order.user_id != user.id {
        return Err(AppError::forbidden("Forbidden"));
    }
    if !order.status.is_cancelable() {
        return Err(AppError::new(ErrorCode::OrderStatusConflict));
    }

    let updated = orders::update_status(&state.db, &id, OrderStatus::Cancelled)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(updated))
}

// ── Admin transitions ──

#[derive(Debug, Deserialize)]
pub struct StatusPatch {
    pub status: String,
}

/// PATCH /api/orders/{id}/status — admin status set, legality-checked
async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPatch>,
) -> AppResult<Json<Order>> {
    let target: OrderStatus = payload
        .status
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid status: {}", payload.status)))?;

    let order = orders::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if !order.status.can_transition_to(target) {
        return Err(AppError::new(ErrorCode::OrderStatusConflict)
            .with_detail("from", order.status.as_str())
            .with_detail("to", target.as_str()));
    }

    let updated = orders::update_status(&state.db, &id, target)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(updated))
}

/// PATCH /api/orders/{id}/verify — commit stock and move to `To Ship`
///
/// A second verify finds the order no longer `Pending COD` and is
/// rejected, so stock is never decremented twice.
async fn verify(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = orders::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if order.status != OrderStatus::PendingCod {
        return Err(AppError::new(ErrorCode::OrderStatusConflict));
    }

    let updated = orders::commit_verification(&state.db, &id, &order.items)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(updated))
}

/// DELETE /api/orders/{id} — soft delete via the terminal `Removed` status.
/// No stock reversal is performed.
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = orders::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if !order.status.can_transition_to(OrderStatus::Removed) {
        return Err(AppError::new(ErrorCode::OrderStatusConflict)
            .with_detail("from", order.status.as_str()));
    }

    let updated = orders::update_status(&state.db, &id, OrderStatus::Removed)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(updated))
}

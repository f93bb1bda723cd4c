//! Product catalog handlers
//!
//! Listing and lookup are public; create and patch are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate, ProductUpdate};

use super::validate_payload;
use crate::core::AppState;
use crate::db::products;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list))
        .route("/api/products/{id}", get(get_by_id))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/api/products", post(create))
        .route("/api/products/{id}", patch(update))
}

/// GET /api/products
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let items = products::find_all(&state.db).await?;
    Ok(Json(items))
}

/// GET /api/products/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = products::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

/// POST /api/products
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_payload(&payload)?;
    let product = products::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/products/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = products::update(&state.db, &id, payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

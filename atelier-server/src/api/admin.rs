//! Admin back-office handlers: sales summary, user management,
//! inventory, banner and popup configuration

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{BannerSet, LoginPopup, Product, Role, SalesSummary};

use super::validate_payload;
use crate::core::AppState;
use crate::db::{banners, carts, orders, products, sales, users};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/sales", get(sales_summary))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", delete(remove_user))
        .route("/api/admin/inventory", get(inventory))
        .route("/api/admin/banners", get(get_banners).put(put_banners))
        .route(
            "/api/admin/login-popup",
            get(get_login_popup).put(put_login_popup),
        )
}

/// GET /api/admin/sales
async fn sales_summary(State(state): State<AppState>) -> AppResult<Json<SalesSummary>> {
    Ok(Json(sales::summary(&state.db).await?))
}

// ── User management ──

#[derive(Debug, Serialize)]
pub struct AdminUserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// GET /api/admin/users
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<AdminUserRow>>> {
    let rows = users::find_all(&state.db)
        .await?
        .into_iter()
        .map(|user| AdminUserRow {
            id: user.id.unwrap_or_default(),
            name: user.name,
            email: user.email,
            role: user.role,
        })
        .collect();
    Ok(Json(rows))
}

/// DELETE /api/admin/users/{id}
///
/// Admin accounts can never be removed here, even by another admin.
/// Removal cascades to the user's cart and orders.
async fn remove_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let target = users::find_by_id(&state.db, &id).await?;
    if target.as_ref().is_some_and(|u| u.role.is_admin()) {
        return Err(AppError::new(ErrorCode::CannotDeleteAdmin));
    }

    let removed = users::remove(&state.db, &id).await?;
    if removed.is_none() {
        return Err(AppError::not_found("User"));
    }
    carts::remove_by_user(&state.db, &id).await?;
    orders::remove_by_user(&state.db, &id).await?;

    Ok(Json(ApiResponse::ok()))
}

/// GET /api/admin/inventory
async fn inventory(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(products::find_all(&state.db).await?))
}

// ── Banner / popup configuration ──

/// GET /api/admin/banners
async fn get_banners(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(banners::get_banners(&state.db).await?))
}

/// PUT /api/admin/banners
async fn put_banners(
    State(state): State<AppState>,
    Json(payload): Json<BannerSet>,
) -> AppResult<Json<Vec<String>>> {
    validate_payload(&payload)?;
    Ok(Json(banners::update_banners(&state.db, payload.images).await?))
}

/// GET /api/admin/login-popup
async fn get_login_popup(State(state): State<AppState>) -> AppResult<Json<LoginPopup>> {
    let image = banners::get_login_popup(&state.db).await?;
    Ok(Json(LoginPopup { image }))
}

/// PUT /api/admin/login-popup
async fn put_login_popup(
    State(state): State<AppState>,
    Json(payload): Json<LoginPopup>,
) -> AppResult<Json<LoginPopup>> {
    let image = banners::update_login_popup(&state.db, payload.image).await?;
    Ok(Json(LoginPopup { image }))
}

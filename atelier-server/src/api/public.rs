//! Public read-only endpoints for the storefront shell

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::error::AppResult;
use shared::models::LoginPopup;

use crate::core::AppState;
use crate::db::banners;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/public/banners", get(get_banners))
        .route("/api/public/login-popup", get(get_login_popup))
}

/// GET /api/public/banners
async fn get_banners(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(banners::get_banners(&state.db).await?))
}

/// GET /api/public/login-popup
async fn get_login_popup(State(state): State<AppState>) -> AppResult<Json<LoginPopup>> {
    let image = banners::get_login_popup(&state.db).await?;
    Ok(Json(LoginPopup { image }))
}

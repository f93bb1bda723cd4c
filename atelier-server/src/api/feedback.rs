//! Order feedback handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Feedback, FeedbackCreate, FeedbackOut};

use super::validate_payload;
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::{feedback, orders, users};

pub fn admin_router() -> Router<AppState> {
    Router::new().route("/api/feedback", get(list))
}

pub fn customer_router() -> Router<AppState> {
    Router::new().route("/api/feedback", post(create))
}

/// GET /api/feedback — admin listing
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Feedback>>> {
    let entries = feedback::find_all(&state.db).await?;
    Ok(Json(entries))
}

/// POST /api/feedback — own order, exactly `To Review`
async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<FeedbackCreate>,
) -> AppResult<(StatusCode, Json<FeedbackOut>)> {
    validate_payload(&payload)?;

    let own_orders = orders::find_by_user(&state.db, &user.id).await?;
    let order = own_orders
        .iter()
        .find(|o| o.id.as_deref() == Some(payload.order_id.as_str()));
    if !order.is_some_and(|o| o.status.accepts_feedback()) {
        return Err(AppError::new(ErrorCode::OrderNotReviewable));
    }

    let author = users::find_by_id(&state.db, &user.id).await?;
    let entry = feedback::create(
        &state.db,
        Feedback {
            id: None,
            order_id: payload.order_id,
            user_id: user.id,
            rating: payload.rating,
            message: payload.message,
            created_at: 0,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackOut {
            entry,
            user_name: author
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Customer".to_string()),
            user_email: author.map(|u| u.email).unwrap_or_default(),
        }),
    ))
}

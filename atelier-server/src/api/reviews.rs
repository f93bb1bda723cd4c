//! Review handlers
//!
//! Listing is public; submitting requires a session and deleting is
//! author-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Review, ReviewCreate};

use super::validate_payload;
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::db::{reviews, users};

// The one path parameter is a product id on GET/POST and a review id
// on DELETE, so the routes share the `{id}` segment.

pub fn public_router() -> Router<AppState> {
    Router::new().route("/api/reviews/{id}", get(list_by_product))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/api/reviews/{id}", post(create).delete(remove))
}

/// GET /api/reviews/{product_id}
async fn list_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = reviews::find_by_product(&state.db, &product_id).await?;
    Ok(Json(reviews))
}

/// POST /api/reviews/{product_id}
async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<Review>)> {
    validate_payload(&payload)?;

    let author = users::find_by_id(&state.db, &user.id).await?;
    let review = reviews::create(
        &state.db,
        Review {
            id: None,
            product_id,
            user_id: user.id,
            user_name: author
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Customer".to_string()),
            user_email: author.map(|u| u.email).unwrap_or_default(),
            rating: payload.rating,
            comment: payload.comment.trim().to_string(),
            created_at: 0,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// DELETE /api/reviews/{review_id} — author only
async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(review_id): Path<String>,
) -> AppResult<Json<Review>> {
    let review = reviews::find_by_id(&state.db, &review_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound))?;

    if review.user_id != user.id {
        return Err(AppError::forbidden("Forbidden"));
    }

    let removed = reviews::remove(&state.db, &review_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound))?;
    Ok(Json(removed))
}

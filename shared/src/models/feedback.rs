//! Feedback Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Post-delivery order feedback entity
///
/// One entry is expected per order reaching `To Review`, but
/// uniqueness is not enforced at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order_id: String,
    pub user_id: String,
    /// 1–5 stars
    pub rating: i32,
    pub message: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Feedback entry enriched with the author snapshot for responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackOut {
    #[serde(flatten)]
    pub entry: Feedback,
    pub user_name: String,
    pub user_email: String,
}

/// POST /api/feedback payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackCreate {
    #[validate(length(min = 4))]
    pub order_id: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 4))]
    pub message: String,
}

//! Review Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product review entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product_id: String,
    pub user_id: String,
    /// Author name snapshot at submission time
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    /// 1–5 stars
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub created_at: i64,
}

/// POST /api/reviews/{product_id} payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewCreate {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 3))]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        for rating in [0, 6] {
            let payload = ReviewCreate {
                rating,
                comment: "Lovely scent".into(),
            };
            assert!(validator::Validate::validate(&payload).is_err(), "rating {rating}");
        }
        let ok = ReviewCreate {
            rating: 5,
            comment: "Lovely scent".into(),
        };
        assert!(validator::Validate::validate(&ok).is_ok());
    }
}

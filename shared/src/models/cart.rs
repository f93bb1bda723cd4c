//! Cart Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One line in a cart
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct CartItem {
    pub product_id: String,
    #[validate(range(min = 1, max = 100))]
    pub quantity: i32,
}

/// Cart entity — one per user, replaced wholesale on every update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub created_at: i64,
}

/// PUT /api/cart payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CartUpdate {
    #[validate(nested)]
    pub items: Vec<CartItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_bounds_enforced() {
        let over = CartUpdate {
            items: vec![CartItem {
                product_id: "p1".into(),
                quantity: 101,
            }],
        };
        assert!(validator::Validate::validate(&over).is_err());

        let zero = CartUpdate {
            items: vec![CartItem {
                product_id: "p1".into(),
                quantity: 0,
            }],
        };
        assert!(validator::Validate::validate(&zero).is_err());

        let ok = CartUpdate {
            items: vec![CartItem {
                product_id: "p1".into(),
                quantity: 3,
            }],
        };
        assert!(validator::Validate::validate(&ok).is_ok());
    }
}

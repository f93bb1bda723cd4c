//! Product Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Category {
    Men,
    Women,
    #[default]
    Unisex,
}

/// Product entity as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Unit price in currency units
    pub price: f64,
    /// Remaining sellable units; decremented on order verification
    pub stock: i32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// POST /api/products payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 2))]
    pub notes: String,
    pub size: Option<String>,
    #[validate(length(min = 10))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub image_url: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub category: Option<Category>,
    pub active: Option<bool>,
}

/// PATCH /api/products/{id} payload — field-level merge, absent fields untouched
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_as_display_label() {
        assert_eq!(serde_json::to_value(Category::Men).unwrap(), "Men");
        assert_eq!(serde_json::to_value(Category::Unisex).unwrap(), "Unisex");
    }

    #[test]
    fn create_payload_rejects_negative_price() {
        let payload = ProductCreate {
            name: "Test".into(),
            price: -1.0,
            stock: 2,
            notes: "Signature blend".into(),
            size: None,
            description: None,
            image_url: None,
            image_urls: None,
            category: None,
            active: None,
        };
        assert!(validator::Validate::validate(&payload).is_err());
    }
}

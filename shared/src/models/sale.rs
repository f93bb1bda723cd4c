//! Sales ledger Model

use serde::{Deserialize, Serialize};

/// Append-only ledger entry written once per completed checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order_id: String,
    pub total: f64,
    #[serde(default)]
    pub created_at: i64,
}

/// Aggregate read over the ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesSummary {
    pub count: i64,
    pub revenue: f64,
}

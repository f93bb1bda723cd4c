//! Order Model and lifecycle state machine
//!
//! Status legality is enforced here for every entry point: the
//! customer cancel, the admin verify/soft-delete, and the free-form
//! admin status patch all consult the same transition table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Order lifecycle status
///
/// Wire labels are fixed display strings; `Pending` exists only as a
/// legacy placeholder default and is never written by checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Legacy placeholder default
    Pending,
    /// Awaiting manual cash-on-delivery verification
    #[serde(rename = "Pending COD")]
    PendingCod,
    /// Verified; stock committed, awaiting dispatch
    #[serde(rename = "To Ship")]
    ToShip,
    /// Dispatched, awaiting delivery
    #[serde(rename = "To Receive")]
    ToReceive,
    /// Delivered; feedback window open
    #[serde(rename = "To Review")]
    ToReview,
    /// Cancelled by the customer before verification
    Cancelled,
    /// Soft-deleted by an admin (terminal)
    Removed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PendingCod => "Pending COD",
            Self::ToShip => "To Ship",
            Self::ToReceive => "To Receive",
            Self::ToReview => "To Review",
            Self::Cancelled => "Cancelled",
            Self::Removed => "Removed",
        }
    }

    /// Whether moving from `self` to `to` is a legal lifecycle step.
    ///
    /// `Cancelled` and `Removed` are terminal; self-transitions are
    /// illegal everywhere (a repeat verify must fail).
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, PendingCod)
                | (Pending, Cancelled)
                | (Pending, Removed)
                | (PendingCod, Cancelled)
                | (PendingCod, ToShip)
                | (PendingCod, Removed)
                | (ToShip, ToReceive)
                | (ToShip, Removed)
                | (ToReceive, ToReview)
                | (ToReceive, Removed)
                | (ToReview, Removed)
        )
    }

    /// Customer-initiated cancellation is only possible before verification
    pub fn is_cancelable(&self) -> bool {
        matches!(self, Self::PendingCod)
    }

    /// Feedback is accepted only in this exact state
    pub fn accepts_feedback(&self) -> bool {
        matches!(self, Self::ToReview)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized status labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOrderStatus(pub String);

impl fmt::Display for InvalidOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order status: {}", self.0)
    }
}

impl std::error::Error for InvalidOrderStatus {}

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Pending COD" => Ok(Self::PendingCod),
            "To Ship" => Ok(Self::ToShip),
            "To Receive" => Ok(Self::ToReceive),
            "To Review" => Ok(Self::ToReview),
            "Cancelled" => Ok(Self::Cancelled),
            "Removed" => Ok(Self::Removed),
            other => Err(InvalidOrderStatus(other.to_string())),
        }
    }
}

/// Purchased line item — a snapshot, not a product reference
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct OrderItem {
    pub product_id: String,
    #[validate(length(min = 2))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Unit price at purchase time
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// Order entity as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub address: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub payment_method: String,
    pub total: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: i64,
}

impl Order {
    /// Order total: Σ unit price × quantity over the line items
    pub fn compute_total(items: &[OrderItem]) -> f64 {
        items.iter().map(|i| i.price * f64::from(i.quantity)).sum()
    }
}

/// POST /api/orders payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItem>,
    #[validate(length(min = 5))]
    pub address: String,
    #[validate(length(min = 2))]
    pub contact_name: String,
    #[validate(length(min = 7))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    /// Only cash-on-delivery is supported
    #[validate(custom(function = validate_cod))]
    pub payment_method: String,
}

fn validate_cod(method: &str) -> Result<(), validator::ValidationError> {
    if method == "COD" {
        Ok(())
    } else {
        Err(validator::ValidationError::new("payment_method"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::PendingCod,
        OrderStatus::ToShip,
        OrderStatus::ToReceive,
        OrderStatus::ToReview,
        OrderStatus::Cancelled,
        OrderStatus::Removed,
    ];

    #[test]
    fn wire_labels_roundtrip() {
        for status in ALL {
            let parsed: OrderStatus = status.as_str().parse().expect("parse");
            assert_eq!(parsed, status);
            let json = serde_json::to_value(status).expect("serialize");
            assert_eq!(json, status.as_str());
        }
    }

    #[test]
    fn unknown_label_rejected() {
        assert!("Shipped".parse::<OrderStatus>().is_err());
        assert!("pending cod".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn pending_cod_fans_out() {
        let from = OrderStatus::PendingCod;
        assert!(from.can_transition_to(OrderStatus::Cancelled));
        assert!(from.can_transition_to(OrderStatus::ToShip));
        assert!(from.can_transition_to(OrderStatus::Removed));
        assert!(!from.can_transition_to(OrderStatus::ToReceive));
        assert!(!from.can_transition_to(OrderStatus::ToReview));
        assert!(!from.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn forward_progression_is_single_step() {
        assert!(OrderStatus::ToShip.can_transition_to(OrderStatus::ToReceive));
        assert!(OrderStatus::ToReceive.can_transition_to(OrderStatus::ToReview));
        assert!(!OrderStatus::ToShip.can_transition_to(OrderStatus::ToReview));
        assert!(!OrderStatus::ToReceive.can_transition_to(OrderStatus::ToShip));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for to in ALL {
            assert!(!OrderStatus::Cancelled.can_transition_to(to), "Cancelled -> {to}");
            assert!(!OrderStatus::Removed.can_transition_to(to), "Removed -> {to}");
        }
    }

    #[test]
    fn self_transitions_are_illegal() {
        for status in ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn soft_delete_reachable_from_every_live_state() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::PendingCod,
            OrderStatus::ToShip,
            OrderStatus::ToReceive,
            OrderStatus::ToReview,
        ] {
            assert!(from.can_transition_to(OrderStatus::Removed), "{from} -> Removed");
        }
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let items = vec![
            OrderItem {
                product_id: "p1".into(),
                name: None,
                quantity: 2,
                price: 300.0,
            },
            OrderItem {
                product_id: "p2".into(),
                name: Some("Cloudy Scent".into()),
                quantity: 1,
                price: 150.0,
            },
        ];
        assert_eq!(Order::compute_total(&items), 750.0);
    }

    #[test]
    fn checkout_payload_requires_cod() {
        let payload = OrderCreate {
            items: vec![OrderItem {
                product_id: "p1".into(),
                name: None,
                quantity: 1,
                price: 300.0,
            }],
            address: "12 Example St, Makati".into(),
            contact_name: "Maria".into(),
            phone: "09170000000".into(),
            email: "maria@example.com".into(),
            payment_method: "GCash".into(),
        };
        assert!(validator::Validate::validate(&payload).is_err());
    }
}

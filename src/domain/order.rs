use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
}

/// A customer's print order, as persisted by the external order store.
///
/// `id` doubles as the payment provider's payment identifier in the common
/// integration mode, which is how webhook events find their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    /// The price computed at checkout, recorded for reconciliation.
    pub total_amount: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a fresh order in the state the checkout flow leaves it in.
    pub fn new(id: impl Into<String>, total_amount: Decimal) -> Self {
        Self {
            id: id.into(),
            payment_status: PaymentStatus::Unpaid,
            status: OrderStatus::Pending,
            total_amount,
            updated_at: Utc::now(),
        }
    }
}

/// Maps a payment provider event to the target status pair, or `None` for
/// event types this system does not act on.
pub fn transition_for(event: &str) -> Option<(PaymentStatus, OrderStatus)> {
    match event {
        "payment.captured" => Some((PaymentStatus::Paid, OrderStatus::Confirmed)),
        "payment.failed" => Some((PaymentStatus::Unpaid, OrderStatus::Pending)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transition_mapping() {
        assert_eq!(
            transition_for("payment.captured"),
            Some((PaymentStatus::Paid, OrderStatus::Confirmed))
        );
        assert_eq!(
            transition_for("payment.failed"),
            Some((PaymentStatus::Unpaid, OrderStatus::Pending))
        );
        assert_eq!(transition_for("payment.authorized"), None);
        assert_eq!(transition_for("refund.processed"), None);
    }

    #[test]
    fn test_new_order_state() {
        let order = Order::new("pay_123", dec!(120));
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, dec!(120));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"PAID\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Confirmed).unwrap(),
            "\"CONFIRMED\""
        );
    }
}

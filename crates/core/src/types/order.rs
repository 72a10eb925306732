//! Order entity type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CustomerId, OrderId};

/// An order record.
///
/// `customer_id` names the owning customer but is deliberately not a foreign
/// key: the customer and order stores are independent databases and are never
/// joined or checked against each other.
///
/// `amount` is a monetary value with two-decimal-place precision
/// (`NUMERIC(18,2)` in the store), serialized as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID, generated by the order store.
    #[serde(default)]
    pub id: OrderId,
    /// The owning customer's ID (no cross-store enforcement).
    #[serde(default)]
    pub customer_id: CustomerId,
    /// Name of the ordered product.
    #[serde(default)]
    pub product_name: String,
    /// Monetary amount of the order.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// When the order was placed (UTC, server-assigned).
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_camel_case() {
        let order = Order {
            id: OrderId::new(12),
            customer_id: CustomerId::new(5),
            product_name: "Widget".to_string(),
            amount: Decimal::new(1000, 2),
            order_date: Some("2026-08-01T12:00:00Z".parse().unwrap()),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], 12);
        assert_eq!(json["customerId"], 5);
        assert_eq!(json["productName"], "Widget");
        assert_eq!(json["amount"], 10.0);
        assert!(json["orderDate"].is_string());
    }

    #[test]
    fn test_amount_accepts_json_numbers() {
        let order: Order = serde_json::from_str(
            r#"{"customerId":5,"productName":"Widget","amount":10.00}"#,
        )
        .unwrap();
        assert_eq!(order.amount, Decimal::new(10, 0));
        assert_eq!(order.id, OrderId::default());
        assert_eq!(order.order_date, None);
    }
}

//! Orders as reported by the backend.

mod status;

pub use status::OrderStatus;

use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

/// One line of a backend order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// Read-only copy of an order owned by the backend.
///
/// All amounts are the backend's figures; nothing here is recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

impl Order {
    /// Returns the number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Returns true if the backend applied a discount.
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_count_and_discount_flag() {
        let order = Order {
            id: OrderId::new(1),
            status: OrderStatus::New,
            lines: vec![
                OrderLine {
                    name: "Margherita".to_string(),
                    unit_price: Money::from_cents(3000),
                    quantity: 2,
                    line_total: Money::from_cents(6000),
                },
                OrderLine {
                    name: "Calabresa".to_string(),
                    unit_price: Money::from_cents(3500),
                    quantity: 1,
                    line_total: Money::from_cents(3500),
                },
            ],
            subtotal: Money::from_cents(9500),
            discount: Money::zero(),
            total: Money::from_cents(10950),
        };

        assert_eq!(order.item_count(), 3);
        assert!(!order.has_discount());
    }
}

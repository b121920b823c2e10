//! Plain-text output for the terminal.

use domain::{Cart, MenuItem, Order};

pub fn menu(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return "The menu is empty.".to_string();
    }
    items
        .iter()
        .map(|item| {
            format!(
                "{:<16} {:<24} {:>12}",
                item.id.as_str(),
                item.name,
                item.price.to_string()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }
    let mut lines: Vec<String> = cart
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "{:>3} x {:<24} {:>12}",
                entry.quantity,
                entry.item.name,
                entry.line_total().to_string()
            )
        })
        .collect();
    lines.push(format!("Subtotal: {}", cart.subtotal()));
    lines.join("\n")
}

/// Full order view: status, lines and the backend's totals.
pub fn order(order: &Order) -> String {
    let mut lines = vec![format!("Order #{}: {}", order.id, order.status)];
    lines.extend(order.lines.iter().map(|line| {
        format!(
            "{:>3} x {:<24} {:>12} {:>12}",
            line.quantity,
            line.name,
            line.unit_price.to_string(),
            line.line_total.to_string()
        )
    }));
    lines.push(format!("Subtotal: {}", order.subtotal));
    if order.has_discount() {
        lines.push(format!("Discount: {}", order.discount));
    }
    lines.push(format!("Total:    {}", order.total));
    lines.join("\n")
}

/// One-line order summary for listings.
pub fn order_summary(order: &Order) -> String {
    format!(
        "#{:<6} {:<18} {:>3} items {:>12}",
        order.id.to_string(),
        order.status.to_string(),
        order.item_count(),
        order.total.to_string()
    )
}

#[cfg(test)]
mod tests {
    use common::{Money, OrderId};
    use domain::{OrderLine, OrderStatus};

    use super::*;

    #[test]
    fn test_empty_views() {
        assert_eq!(menu(&[]), "The menu is empty.");
        assert_eq!(cart(&Cart::new()), "Your cart is empty.");
    }

    #[test]
    fn test_order_hides_zero_discount() {
        let order = Order {
            id: OrderId::new(2),
            status: OrderStatus::New,
            lines: vec![OrderLine {
                name: "Calabresa".to_string(),
                unit_price: Money::from_cents(3500),
                quantity: 1,
                line_total: Money::from_cents(3500),
            }],
            subtotal: Money::from_cents(3500),
            discount: Money::zero(),
            total: Money::from_cents(3500),
        };

        let text = super::order(&order);
        assert!(text.starts_with("Order #2: "));
        assert!(!text.contains("Discount"));
        assert!(text.ends_with("R$ 35.00"));
    }
}

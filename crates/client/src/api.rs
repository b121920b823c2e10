//! Order API trait and request/response types.

use async_trait::async_trait;
use common::{OrderId, PizzaId};
use domain::{Cart, Discount, DomainError, MenuItem, Order, OrderStatus, PaymentMethod};

use crate::Result;

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub pizza_id: PizzaId,
    pub quantity: u32,
}

/// Order-creation request: the requested lines and an optional discount rule.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub discount: Option<Discount>,
}

impl NewOrder {
    /// Builds a request from the cart, one line per entry in cart order.
    ///
    /// Fails with [`DomainError::EmptyCart`] when there is nothing to order.
    pub fn from_cart(
        cart: &Cart,
        discount: Option<Discount>,
    ) -> std::result::Result<Self, DomainError> {
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        Ok(Self {
            items: cart
                .entries()
                .iter()
                .map(|entry| NewOrderItem {
                    pizza_id: entry.item.id.clone(),
                    quantity: entry.quantity,
                })
                .collect(),
            discount,
        })
    }
}

/// Outcome of a successful payment call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Confirmation text from the backend, if it sent one.
    pub message: Option<String>,
    /// Order state after payment, if the backend returned it.
    pub order: Option<Order>,
}

/// Operations offered by the order backend.
///
/// Implementations must be thread-safe (Send + Sync); the storefront holds
/// them behind an `Arc` shared by every page.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Fetches the backend's configuration blob, passed through untouched.
    async fn get_config(&self) -> Result<serde_json::Value>;

    /// Fetches the catalog in backend order.
    async fn get_menu(&self) -> Result<Vec<MenuItem>>;

    /// Creates an order and returns it with the backend-assigned ID.
    async fn create_order(&self, order: &NewOrder) -> Result<Order>;

    /// Fetches one order.
    async fn get_order(&self, id: OrderId) -> Result<Order>;

    /// Fetches every order the backend holds.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Moves an order to a new status and returns the updated order.
    async fn update_order_status(&self, id: OrderId, status: &OrderStatus) -> Result<Order>;

    /// Pays for an order with the given method.
    async fn pay_order(&self, id: OrderId, method: PaymentMethod) -> Result<PaymentReceipt>;
}

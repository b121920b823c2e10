//! Locally persisted storefront state.

use common::OrderId;
use domain::Cart;
use local_state::{StateSlot, StateStore};

/// Cart contents between page loads.
pub const CART_SLOT: StateSlot<Cart> = StateSlot::with_validator("cart", validate_cart);

/// The most recently created order.
pub const ORDER_ID_SLOT: StateSlot<OrderId> =
    StateSlot::with_validator("orderId", validate_order_id);

fn validate_cart(cart: &Cart) -> Result<(), String> {
    cart.validate().map_err(|e| e.to_string())
}

fn validate_order_id(id: &OrderId) -> Result<(), String> {
    if id.as_i64() > 0 {
        Ok(())
    } else {
        Err(format!("non-positive order id {id}"))
    }
}

/// Picks the order to show: the route's ID if present, else the stored one.
pub async fn resolve_order_id<S: StateStore + ?Sized>(
    store: &S,
    route_id: Option<OrderId>,
) -> local_state::Result<Option<OrderId>> {
    if route_id.is_some() {
        return Ok(route_id);
    }
    ORDER_ID_SLOT.load(store).await
}

//! Cart persisted in local state.

use std::sync::Arc;

use common::{Money, PizzaId};
use domain::{Cart, MenuItem};
use local_state::StateStore;

use crate::{CART_SLOT, Result};

/// The cart as the pages see it: restored from and persisted to local state.
///
/// Mutations only touch memory; call [`persist`](Self::persist) to save.
pub struct CartPage<S: StateStore + ?Sized> {
    store: Arc<S>,
    cart: Cart,
}

impl<S: StateStore + ?Sized> CartPage<S> {
    /// Restores the saved cart. Missing or unreadable content gives an
    /// empty cart.
    pub async fn restore(store: Arc<S>) -> Result<Self> {
        let cart = CART_SLOT.load(store.as_ref()).await?.unwrap_or_default();
        tracing::debug!(entries = cart.len(), "cart restored");
        Ok(Self { store, cart })
    }

    /// Starts from an empty cart without reading local state.
    pub fn empty(store: Arc<S>) -> Self {
        Self {
            store,
            cart: Cart::new(),
        }
    }

    /// Saves the cart.
    pub async fn persist(&self) -> Result<()> {
        CART_SLOT.save(self.store.as_ref(), &self.cart).await?;
        Ok(())
    }

    /// Adds one unit of `item`, returning its new quantity.
    pub fn add_item(&mut self, item: &MenuItem) -> u32 {
        self.cart.add_item(item)
    }

    /// Removes one unit of a pizza. See [`Cart::decrement`].
    pub fn decrement(&mut self, pizza_id: &PizzaId) -> Option<u32> {
        self.cart.decrement(pizza_id)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// Returns the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the cart subtotal.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }
}

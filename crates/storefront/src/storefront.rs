//! Entry point wiring the pages to one backend and one local store.

use std::sync::Arc;

use client::OrderApi;
use common::OrderId;
use local_state::StateStore;

use crate::{CartPage, MenuCatalog, OrderSubmission, OrderTracker, PaymentPage, Result};

/// Shared handles for every page of the storefront.
///
/// Each factory method returns a fresh component with its own request
/// scope; dropping the component cancels its in-flight requests.
pub struct Storefront<A: OrderApi + ?Sized, S: StateStore + ?Sized> {
    api: Arc<A>,
    store: Arc<S>,
}

impl<A: OrderApi + ?Sized, S: StateStore + ?Sized> Clone for Storefront<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: Arc::clone(&self.store),
        }
    }
}

impl<A: OrderApi + ?Sized, S: StateStore + ?Sized> Storefront<A, S> {
    /// Creates a storefront over one backend and one local store.
    pub fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self { api, store }
    }

    /// Returns an idle menu catalog.
    pub fn catalog(&self) -> MenuCatalog<A> {
        MenuCatalog::new(Arc::clone(&self.api))
    }

    /// Restores the saved cart.
    pub async fn cart(&self) -> Result<CartPage<S>> {
        CartPage::restore(Arc::clone(&self.store)).await
    }

    /// Returns an idle checkout.
    pub fn submission(&self) -> OrderSubmission<A, S> {
        OrderSubmission::new(Arc::clone(&self.api), Arc::clone(&self.store))
    }

    /// Returns a payment page for the given route parameter.
    pub fn payment(&self, order_id: Option<OrderId>) -> PaymentPage<A, S> {
        PaymentPage::new(Arc::clone(&self.api), Arc::clone(&self.store), order_id)
    }

    /// Returns an order tracker for the given route parameter.
    pub fn tracker(&self, order_id: Option<OrderId>) -> OrderTracker<A, S> {
        OrderTracker::new(Arc::clone(&self.api), Arc::clone(&self.store), order_id)
    }

    /// Returns the shared backend client.
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Returns the shared local state store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

//! Order status page.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use client::OrderApi;
use common::OrderId;
use domain::Order;
use local_state::StateStore;

use crate::persist::resolve_order_id;
use crate::{CancelHandle, Failure, LoadState, RequestScope, Result, StorefrontError};

/// Shows one order and re-fetches it on demand.
///
/// The order is taken from the route when given, otherwise from the
/// locally saved `orderId`. With neither, the tracker fails immediately
/// without calling the backend.
pub struct OrderTracker<A: OrderApi + ?Sized, S: StateStore + ?Sized> {
    api: Arc<A>,
    store: Arc<S>,
    scope: RequestScope,
    route_id: Option<OrderId>,
    order_id: Option<OrderId>,
    state: LoadState<Order>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<A: OrderApi + ?Sized, S: StateStore + ?Sized> OrderTracker<A, S> {
    /// Creates an idle tracker for the given route parameter.
    pub fn new(api: Arc<A>, store: Arc<S>, route_id: Option<OrderId>) -> Self {
        Self {
            api,
            store,
            scope: RequestScope::new(),
            route_id,
            order_id: None,
            state: LoadState::Idle,
            fetched_at: None,
        }
    }

    /// Resolves the order ID and loads the order.
    pub async fn open(&mut self) -> Result<()> {
        match resolve_order_id(self.store.as_ref(), self.route_id).await {
            Ok(id) => self.order_id = id,
            Err(e) => return Err(self.fail(e.into())),
        }
        self.reload().await
    }

    /// Fetches the order again. Allowed from any state.
    pub async fn reload(&mut self) -> Result<()> {
        let Some(id) = self.order_id else {
            return Err(self.fail(StorefrontError::NoOrder));
        };

        self.state = LoadState::Loading;
        match self.scope.run(self.api.get_order(id)).await {
            Ok(Ok(order)) => {
                tracing::debug!(order_id = %id, status = %order.status, "order loaded");
                self.state = LoadState::Loaded(order);
                self.fetched_at = Some(Utc::now());
                Ok(())
            }
            Ok(Err(e)) => Err(self.fail(e.into())),
            Err(_) => {
                self.state = LoadState::Idle;
                Err(StorefrontError::Cancelled)
            }
        }
    }

    /// Returns the current load state.
    pub fn state(&self) -> &LoadState<Order> {
        &self.state
    }

    /// Returns the loaded order, if any.
    pub fn order(&self) -> Option<&Order> {
        self.state.loaded()
    }

    /// Returns the resolved order ID.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Returns when the order was last fetched successfully.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Returns a handle that cancels this tracker's requests.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    fn fail(&mut self, err: StorefrontError) -> StorefrontError {
        tracing::warn!(error = %err, "order tracking failed");
        self.state = LoadState::Failed(Failure::from(&err));
        err
    }
}

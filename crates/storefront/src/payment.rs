//! Payment page.

use std::sync::Arc;

use client::{OrderApi, PaymentReceipt};
use common::OrderId;
use domain::{Order, PaymentMethod};
use local_state::StateStore;

use crate::persist::resolve_order_id;
use crate::{CancelHandle, Failure, LoadState, RequestScope, Result, StorefrontError};

/// Shown when the backend confirms a payment without a message.
pub const DEFAULT_PAID_MESSAGE: &str = "Payment completed successfully!";

/// State of the pay action, independent of the order load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PayState {
    #[default]
    Idle,
    Paying,
    Paid { message: String },
    Failed(Failure),
}

/// Loads the current order and pays for it.
///
/// Two state machines run side by side: the order load
/// (`Idle -> Loading -> Loaded | Failed`) and the pay action
/// (`Idle -> Paying -> Paid | Failed`).
pub struct PaymentPage<A: OrderApi + ?Sized, S: StateStore + ?Sized> {
    api: Arc<A>,
    store: Arc<S>,
    scope: RequestScope,
    route_id: Option<OrderId>,
    order_id: Option<OrderId>,
    order: LoadState<Order>,
    method: PaymentMethod,
    pay_state: PayState,
}

impl<A: OrderApi + ?Sized, S: StateStore + ?Sized> PaymentPage<A, S> {
    /// Creates a page for the given route parameter with PIX selected.
    pub fn new(api: Arc<A>, store: Arc<S>, route_id: Option<OrderId>) -> Self {
        Self {
            api,
            store,
            scope: RequestScope::new(),
            route_id,
            order_id: None,
            order: LoadState::Idle,
            method: PaymentMethod::default(),
            pay_state: PayState::Idle,
        }
    }

    /// Resolves the order ID (route first, then local state) and loads the order.
    pub async fn open(&mut self) -> Result<()> {
        match resolve_order_id(self.store.as_ref(), self.route_id).await {
            Ok(id) => self.order_id = id,
            Err(e) => return Err(self.fail_load(e.into())),
        }
        self.reload().await
    }

    /// Fetches the order again.
    pub async fn reload(&mut self) -> Result<()> {
        let Some(id) = self.order_id else {
            return Err(self.fail_load(StorefrontError::NoOrder));
        };

        self.order = LoadState::Loading;
        match self.scope.run(self.api.get_order(id)).await {
            Ok(Ok(order)) => {
                self.order = LoadState::Loaded(order);
                Ok(())
            }
            Ok(Err(e)) => Err(self.fail_load(e.into())),
            Err(_) => {
                self.order = LoadState::Idle;
                Err(StorefrontError::Cancelled)
            }
        }
    }

    /// Changes the payment method. Clears a previous success message.
    pub fn select_method(&mut self, method: PaymentMethod) {
        self.method = method;
        if matches!(self.pay_state, PayState::Paid { .. }) {
            self.pay_state = PayState::Idle;
        }
    }

    /// Pays for the order with the selected method.
    ///
    /// On success the cached order is replaced by the one the backend
    /// returned, or re-fetched when the response carried none. A failed or
    /// cancelled re-fetch is logged and does not undo the payment outcome.
    pub async fn pay(&mut self) -> Result<()> {
        let Some(id) = self.order_id else {
            return Err(self.fail_pay(StorefrontError::NoOrder));
        };

        let method = self.method;
        self.pay_state = PayState::Paying;
        let receipt = match self.scope.run(self.api.pay_order(id, method)).await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => return Err(self.fail_pay(e.into())),
            Err(_) => {
                self.pay_state = PayState::Idle;
                return Err(StorefrontError::Cancelled);
            }
        };

        tracing::info!(order_id = %id, method = %method, "order paid");
        let PaymentReceipt { message, order } = receipt;
        self.pay_state = PayState::Paid {
            message: message.unwrap_or_else(|| DEFAULT_PAID_MESSAGE.to_string()),
        };

        match order {
            Some(order) => self.order = LoadState::Loaded(order),
            None => match self.scope.run(self.api.get_order(id)).await {
                Ok(Ok(order)) => self.order = LoadState::Loaded(order),
                Ok(Err(e)) => {
                    tracing::warn!(
                        order_id = %id,
                        error = %e,
                        "order refresh after payment failed"
                    );
                }
                Err(_) => {
                    tracing::warn!(order_id = %id, "order refresh after payment cancelled");
                }
            },
        }
        Ok(())
    }

    /// Returns the selected payment method.
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Returns the pay action state.
    pub fn pay_state(&self) -> &PayState {
        &self.pay_state
    }

    /// Returns the order load state.
    pub fn order_state(&self) -> &LoadState<Order> {
        &self.order
    }

    /// Returns the loaded order, if any.
    pub fn order(&self) -> Option<&Order> {
        self.order.loaded()
    }

    /// Returns the resolved order ID.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Returns a handle that cancels this page's requests.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    fn fail_load(&mut self, err: StorefrontError) -> StorefrontError {
        tracing::warn!(error = %err, "payment page load failed");
        self.order = LoadState::Failed(Failure::from(&err));
        err
    }

    fn fail_pay(&mut self, err: StorefrontError) -> StorefrontError {
        tracing::warn!(error = %err, "payment failed");
        self.pay_state = PayState::Failed(Failure::from(&err));
        err
    }
}

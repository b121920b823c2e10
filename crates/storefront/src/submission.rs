//! Checkout: turning the cart into a backend order.

use std::sync::Arc;

use client::{NewOrder, OrderApi};
use domain::{Cart, Discount, Order};
use local_state::StateStore;

use crate::{CancelHandle, Failure, ORDER_ID_SLOT, RequestScope, Result, Route, StorefrontError};

/// Checkout state.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Submitted(Order),
    Failed(Failure),
}

/// Creates orders from the cart and remembers the new order's ID.
pub struct OrderSubmission<A: OrderApi + ?Sized, S: StateStore + ?Sized> {
    api: Arc<A>,
    store: Arc<S>,
    scope: RequestScope,
    state: SubmissionState,
}

impl<A: OrderApi + ?Sized, S: StateStore + ?Sized> OrderSubmission<A, S> {
    /// Creates an idle submission.
    pub fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self {
            api,
            store,
            scope: RequestScope::new(),
            state: SubmissionState::Idle,
        }
    }

    /// Submits `cart` with an optional discount rule.
    ///
    /// An empty cart fails validation without contacting the backend. On
    /// success the order ID is saved locally and the payment page, carrying
    /// the ID, is returned as the next route. If only the local save fails
    /// the submission still succeeds. Failures are retryable by calling again.
    pub async fn submit(&mut self, cart: &Cart, discount: Option<Discount>) -> Result<Route> {
        let request = match NewOrder::from_cart(cart, discount) {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.state = SubmissionState::Submitting;
        let order = match self.scope.run(self.api.create_order(&request)).await {
            Ok(Ok(order)) => order,
            Ok(Err(e)) => return Err(self.fail(e.into())),
            Err(_) => {
                self.state = SubmissionState::Idle;
                return Err(StorefrontError::Cancelled);
            }
        };

        let id = order.id;
        tracing::info!(order_id = %id, total = %order.total, "order created");
        self.state = SubmissionState::Submitted(order);

        // The order already exists on the backend; a failed local save is
        // not a failed submission.
        if let Err(e) = ORDER_ID_SLOT.save(self.store.as_ref(), &id).await {
            tracing::warn!(order_id = %id, error = %e, "could not save order id locally");
        }

        Ok(Route::Payment { order_id: Some(id) })
    }

    /// Returns the current state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Returns the created order, if any.
    pub fn order(&self) -> Option<&Order> {
        match &self.state {
            SubmissionState::Submitted(order) => Some(order),
            _ => None,
        }
    }

    /// Returns a handle that cancels this submission's requests.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    fn fail(&mut self, err: StorefrontError) -> StorefrontError {
        tracing::warn!(error = %err, "order submission failed");
        self.state = SubmissionState::Failed(Failure::from(&err));
        err
    }
}

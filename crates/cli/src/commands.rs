//! Subcommand execution.

use std::sync::{Arc, Mutex, PoisonError};

use client::OrderApi;
use local_state::StateStore;
use storefront::{CancelHandle, PayState, RequestScope, Result, Storefront, StorefrontError};

use crate::args::Command;
use crate::render;

/// Cancels whatever request the running command has in flight.
///
/// Components register their cancel handle before issuing requests. Once
/// fired, every registered and every later handle is cancelled.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    inner: Arc<Mutex<InterruptState>>,
}

#[derive(Debug, Default)]
struct InterruptState {
    fired: bool,
    handles: Vec<CancelHandle>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `handle`, cancelling it right away if already fired.
    pub fn register(&self, handle: CancelHandle) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.fired {
            handle.cancel();
        }
        state.handles.push(handle);
    }

    /// Cancels every registered handle.
    pub fn fire(&self) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.fired = true;
        for handle in &state.handles {
            handle.cancel();
        }
    }

    pub fn is_fired(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fired
    }
}

/// Runs subcommands against one storefront.
pub struct App<A: OrderApi + ?Sized, S: StateStore + ?Sized> {
    storefront: Storefront<A, S>,
    interrupt: Interrupt,
}

impl<A: OrderApi + ?Sized, S: StateStore + ?Sized> App<A, S> {
    pub fn new(storefront: Storefront<A, S>) -> Self {
        Self {
            storefront,
            interrupt: Interrupt::new(),
        }
    }

    /// Returns the interrupt that cancels this app's requests.
    pub fn interrupt(&self) -> Interrupt {
        self.interrupt.clone()
    }

    /// Runs one subcommand and returns its output.
    pub async fn run(&self, command: Command) -> Result<String> {
        tracing::debug!(?command, "running command");
        match command {
            Command::Menu => {
                let mut catalog = self.storefront.catalog();
                self.interrupt.register(catalog.cancel_handle());
                catalog.load().await?;
                Ok(render::menu(catalog.items()))
            }
            Command::Add { pizza_id } => {
                let mut catalog = self.storefront.catalog();
                self.interrupt.register(catalog.cancel_handle());
                catalog.load().await?;
                let item = catalog.require(&pizza_id)?;

                let mut cart = self.storefront.cart().await?;
                let quantity = cart.add_item(item);
                cart.persist().await?;
                Ok(format!(
                    "Added {} (x{quantity}). Subtotal: {}",
                    item.name,
                    cart.subtotal()
                ))
            }
            Command::Remove { pizza_id } => {
                let mut cart = self.storefront.cart().await?;
                let message = match cart.decrement(&pizza_id) {
                    None => return Ok(format!("\"{pizza_id}\" is not in the cart.")),
                    Some(0) => format!("Removed \"{pizza_id}\" from the cart."),
                    Some(left) => format!("\"{pizza_id}\": {left} left."),
                };
                cart.persist().await?;
                Ok(format!("{message} Subtotal: {}", cart.subtotal()))
            }
            Command::Cart => {
                let cart = self.storefront.cart().await?;
                Ok(render::cart(cart.cart()))
            }
            Command::ClearCart => {
                let mut cart = self.storefront.cart().await?;
                cart.clear();
                cart.persist().await?;
                Ok("Cart emptied.".to_string())
            }
            Command::Checkout(discount) => {
                let discount = discount.to_discount()?;
                let cart = self.storefront.cart().await?;

                let mut submission = self.storefront.submission();
                self.interrupt.register(submission.cancel_handle());
                let next = submission.submit(cart.cart(), discount).await?;

                let mut out = submission.order().map(render::order).unwrap_or_default();
                out.push_str(&format!("\nNext: {next}"));
                Ok(out)
            }
            Command::Pay { method, order } => {
                let mut page = self.storefront.payment(order);
                self.interrupt.register(page.cancel_handle());
                // Paying only needs the order ID; the order view may fail to load.
                if let Err(e) = page.open().await {
                    if page.order_id().is_none() || matches!(e, StorefrontError::Cancelled) {
                        return Err(e);
                    }
                    tracing::warn!(error = %e, "order load failed, paying anyway");
                }
                page.select_method(method);
                page.pay().await?;

                let mut lines = Vec::new();
                if let PayState::Paid { message } = page.pay_state() {
                    lines.push(message.clone());
                }
                if let Some(order) = page.order() {
                    lines.push(render::order(order));
                }
                Ok(lines.join("\n"))
            }
            Command::Track { order_id } => {
                let mut tracker = self.storefront.tracker(order_id);
                self.interrupt.register(tracker.cancel_handle());
                tracker.open().await?;

                let mut out = tracker.order().map(render::order).unwrap_or_default();
                if let Some(at) = tracker.fetched_at() {
                    out.push_str(&format!("\nUpdated {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
                }
                Ok(out)
            }
            Command::Orders => {
                let orders = self.scoped(self.storefront.api().list_orders()).await?;
                if orders.is_empty() {
                    return Ok("No orders yet.".to_string());
                }
                Ok(orders
                    .iter()
                    .map(render::order_summary)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Command::Status { order_id, status } => {
                let api = self.storefront.api();
                let order = self
                    .scoped(api.update_order_status(order_id, &status))
                    .await?;
                tracing::info!(%order_id, status = %order.status, "order status updated");
                Ok(render::order(&order))
            }
            Command::Config => {
                let config = self.scoped(self.storefront.api().get_config()).await?;
                Ok(format!("{config:#}"))
            }
        }
    }

    /// Runs a direct API call under a fresh request scope.
    async fn scoped<T>(
        &self,
        call: impl Future<Output = client::Result<T>>,
    ) -> Result<T> {
        let scope = RequestScope::new();
        self.interrupt.register(scope.handle());
        Ok(scope.run(call).await??)
    }
}

//! In-memory order API for testing.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{Money, OrderId};
use domain::{Discount, MenuItem, Order, OrderLine, OrderStatus, PaymentMethod};
use tokio::sync::Mutex;

use crate::api::{NewOrder, OrderApi, PaymentReceipt};
use crate::{ClientError, Result};

#[derive(Debug, Default)]
struct InMemoryApiState {
    menu: Vec<MenuItem>,
    orders: BTreeMap<OrderId, Order>,
    next_id: i64,
    calls: usize,
    fail_next: Option<ClientError>,
    fail_always: Option<ClientError>,
    delay: Option<Duration>,
    created: Vec<NewOrder>,
    payments: Vec<(OrderId, PaymentMethod)>,
    pay_message: Option<String>,
    pay_returns_order: bool,
}

/// In-memory order API for testing.
///
/// Behaves like a minimal backend: it serves a fixed menu, numbers orders
/// from 1, and records every create and pay call. Failures and latency can
/// be scripted per test.
#[derive(Debug, Clone)]
pub struct InMemoryOrderApi {
    state: Arc<Mutex<InMemoryApiState>>,
}

impl InMemoryOrderApi {
    /// Creates an API with an empty menu.
    pub fn new() -> Self {
        Self::with_menu(Vec::new())
    }

    /// Creates an API serving the given menu.
    pub fn with_menu(menu: Vec<MenuItem>) -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryApiState {
                menu,
                pay_returns_order: true,
                ..InMemoryApiState::default()
            })),
        }
    }

    /// Makes the next call fail with `error`.
    pub async fn fail_next(&self, error: ClientError) {
        self.state.lock().await.fail_next = Some(error);
    }

    /// Makes every call fail with `error` until cleared with `None`.
    pub async fn fail_always(&self, error: Option<ClientError>) {
        self.state.lock().await.fail_always = error;
    }

    /// Delays every response by `delay`.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        self.state.lock().await.delay = delay;
    }

    /// Sets the confirmation message returned by `pay_order`.
    pub async fn set_pay_message(&self, message: Option<String>) {
        self.state.lock().await.pay_message = message;
    }

    /// Controls whether `pay_order` echoes the order back.
    pub async fn set_pay_returns_order(&self, returns_order: bool) {
        self.state.lock().await.pay_returns_order = returns_order;
    }

    /// Inserts or replaces an order.
    pub async fn insert_order(&self, order: Order) {
        let mut state = self.state.lock().await;
        state.next_id = state.next_id.max(order.id.as_i64());
        state.orders.insert(order.id, order);
    }

    /// Returns the number of API calls made so far, failed ones included.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls
    }

    /// Returns every create request received.
    pub async fn created_orders(&self) -> Vec<NewOrder> {
        self.state.lock().await.created.clone()
    }

    /// Returns every payment received.
    pub async fn payments(&self) -> Vec<(OrderId, PaymentMethod)> {
        self.state.lock().await.payments.clone()
    }

    /// Counts the call, waits out any delay, then applies scripted failures.
    async fn begin_call(&self) -> Result<()> {
        let delay = {
            let mut state = self.state.lock().await;
            state.calls += 1;
            state.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().await;
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        if let Some(error) = &state.fail_always {
            return Err(error.clone());
        }
        Ok(())
    }
}

impl Default for InMemoryOrderApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: OrderId) -> ClientError {
    ClientError::NotFound(format!("order {id} not found"))
}

fn discount_amount(discount: Option<&Discount>, subtotal: Money) -> Money {
    match discount {
        None => Money::zero(),
        Some(Discount::Percentage { fraction }) => {
            Money::from_cents((subtotal.cents() as f64 * fraction).round() as i64)
        }
        Some(Discount::MinimumThreshold {
            minimum,
            fixed_discount,
        }) => {
            if subtotal >= *minimum {
                *fixed_discount
            } else {
                Money::zero()
            }
        }
    }
}

#[async_trait]
impl OrderApi for InMemoryOrderApi {
    async fn get_config(&self) -> Result<serde_json::Value> {
        self.begin_call().await?;
        Ok(serde_json::json!({ "taxa_entrega": 5.0, "percentual_servico": 0.1 }))
    }

    async fn get_menu(&self) -> Result<Vec<MenuItem>> {
        self.begin_call().await?;
        Ok(self.state.lock().await.menu.clone())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;

        let mut lines = Vec::with_capacity(order.items.len());
        for requested in &order.items {
            let item = state
                .menu
                .iter()
                .find(|m| m.id == requested.pizza_id)
                .ok_or_else(|| ClientError::Rejected {
                    status: 400,
                    message: format!("invalid pizza_id: {}", requested.pizza_id),
                })?;
            lines.push(OrderLine {
                name: item.name.clone(),
                unit_price: item.price,
                quantity: requested.quantity,
                line_total: item.price.multiply(requested.quantity),
            });
        }

        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        let discount = discount_amount(order.discount.as_ref(), subtotal);

        state.next_id += 1;
        let created = Order {
            id: OrderId::new(state.next_id),
            status: OrderStatus::New,
            lines,
            subtotal,
            discount,
            total: subtotal - discount,
        };
        state.orders.insert(created.id, created.clone());
        state.created.push(order.clone());
        Ok(created)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order> {
        self.begin_call().await?;
        self.state
            .lock()
            .await
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.begin_call().await?;
        Ok(self.state.lock().await.orders.values().cloned().collect())
    }

    async fn update_order_status(&self, id: OrderId, status: &OrderStatus) -> Result<Order> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        let order = state.orders.get_mut(&id).ok_or_else(|| not_found(id))?;
        order.status = status.clone();
        Ok(order.clone())
    }

    async fn pay_order(&self, id: OrderId, method: PaymentMethod) -> Result<PaymentReceipt> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        let order = state.orders.get(&id).cloned().ok_or_else(|| not_found(id))?;
        state.payments.push((id, method));

        Ok(PaymentReceipt {
            message: state.pay_message.clone(),
            order: state.pay_returns_order.then_some(order),
        })
    }
}

//! `reqwest` implementation of [`OrderApi`].

use async_trait::async_trait;
use common::OrderId;
use domain::{MenuItem, Order, OrderStatus, PaymentMethod};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{NewOrder, OrderApi, PaymentReceipt};
use crate::wire::{
    CreateOrderRequest, MenuItemDto, OrderDto, PayRequest, PayResponse, StatusUpdateRequest,
};
use crate::{ClientConfig, ClientError, Result};

/// Header carrying the per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Order API client speaking HTTP/JSON to the backend.
///
/// Every request is bounded by the configured timeout, tagged with a fresh
/// `x-request-id`, and counted in `pizzaria_client_requests_total` /
/// `pizzaria_client_failures_total`.
#[derive(Debug, Clone)]
pub struct HttpOrderApi {
    client: Client,
    base_url: Url,
}

impl HttpOrderApi {
    /// Creates a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let trimmed = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/"))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pizzaria/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("api_request", operation, %request_id);

        async move {
            metrics::counter!("pizzaria_client_requests_total", "operation" => operation)
                .increment(1);

            let result = execute(request.header(REQUEST_ID_HEADER, request_id.to_string())).await;
            match &result {
                Ok(_) => tracing::debug!("request succeeded"),
                Err(e) => {
                    metrics::counter!("pizzaria_client_failures_total", "operation" => operation)
                        .increment(1);
                    tracing::warn!(error = %e, "request failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}

async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::from_status(status.as_u16(), &body));
    }

    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    async fn get_config(&self) -> Result<serde_json::Value> {
        let request = self.client.get(self.url("config")?);
        self.send("get_config", request).await
    }

    async fn get_menu(&self) -> Result<Vec<MenuItem>> {
        let request = self.client.get(self.url("menu")?);
        let items: Vec<MenuItemDto> = self.send("get_menu", request).await?;
        Ok(items.into_iter().map(MenuItem::from).collect())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let body = CreateOrderRequest::from(order);
        let request = self.client.post(self.url("orders")?).json(&body);
        let created: OrderDto = self.send("create_order", request).await?;
        Ok(created.into())
    }

    async fn get_order(&self, id: OrderId) -> Result<Order> {
        let request = self.client.get(self.url(&format!("orders/{id}"))?);
        let order: OrderDto = self.send("get_order", request).await?;
        Ok(order.into())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let request = self.client.get(self.url("orders")?);
        let orders: Vec<OrderDto> = self.send("list_orders", request).await?;
        Ok(orders.into_iter().map(Order::from).collect())
    }

    async fn update_order_status(&self, id: OrderId, status: &OrderStatus) -> Result<Order> {
        let body = StatusUpdateRequest {
            status: status.code().to_string(),
        };
        let request = self
            .client
            .patch(self.url(&format!("orders/{id}/status"))?)
            .json(&body);
        let order: OrderDto = self.send("update_order_status", request).await?;
        Ok(order.into())
    }

    async fn pay_order(&self, id: OrderId, method: PaymentMethod) -> Result<PaymentReceipt> {
        let request = self
            .client
            .post(self.url(&format!("orders/{id}/pay"))?)
            .json(&PayRequest::from(method));
        let response: Option<PayResponse> = self.send("pay_order", request).await?;
        Ok(response.unwrap_or_default().into())
    }
}

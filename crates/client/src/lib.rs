//! Client for the pizzaria order API.
//!
//! Provides:
//! - [`OrderApi`] trait covering every backend endpoint
//! - [`HttpOrderApi`], the `reqwest` implementation with timeouts, request
//!   IDs, tracing spans and request counters
//! - [`InMemoryOrderApi`], a scripted stand-in for tests
//! - [`wire`] DTOs matching the backend's JSON

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod wire;

pub use api::{NewOrder, NewOrderItem, OrderApi, PaymentReceipt};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::HttpOrderApi;
pub use memory::InMemoryOrderApi;

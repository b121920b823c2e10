//! Domain layer for the pizzaria storefront.
//!
//! This crate provides the client-side model of the ordering flow:
//! - [`MenuItem`] entries fetched from the catalog
//! - [`Cart`] with one entry per pizza and a computed subtotal
//! - [`Discount`] descriptors handed to the backend at order creation
//! - [`Order`] as returned by the backend, with its [`OrderStatus`]
//! - [`PaymentMethod`] choices accepted by the backend
//!
//! Prices, discounts and totals are computed by the backend. The only sum
//! done here is the cart subtotal shown before checkout.

pub mod cart;
pub mod discount;
pub mod error;
pub mod menu;
pub mod order;
pub mod payment;

pub use cart::{Cart, CartEntry};
pub use common::{Money, OrderId, PizzaId};
pub use discount::Discount;
pub use error::DomainError;
pub use menu::MenuItem;
pub use order::{Order, OrderLine, OrderStatus};
pub use payment::PaymentMethod;

//! Domain error types.

use thiserror::Error;

/// Errors that can occur when building or validating domain values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// An order cannot be created from an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart contents violate an invariant (duplicate pizza, zero quantity).
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// Discount parameters are out of range.
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    /// Payment method not in the accepted set.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Order status not known to the backend.
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
}

//! Storefront error types and user-facing messages.

use client::ClientError;
use common::PizzaId;
use domain::DomainError;
use local_state::StateError;
use thiserror::Error;

use crate::Cancelled;

/// Shown when neither the route nor local state names an order.
pub const NO_ORDER_MESSAGE: &str = "No order found. Create an order first.";

/// Errors surfaced by storefront components.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Input rejected before any request was made (e.g. empty cart).
    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),

    /// No order ID could be resolved.
    #[error("No order found")]
    NoOrder,

    /// The requested pizza is not on the menu.
    #[error("Pizza not on the menu: {0}")]
    UnknownPizza(PizzaId),

    /// The backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ClientError),

    /// Local state could not be read or written.
    #[error("Local state error: {0}")]
    State(#[from] StateError),

    /// The request was cancelled because its component went away.
    #[error("Request cancelled")]
    Cancelled,
}

impl From<Cancelled> for StorefrontError {
    fn from(_: Cancelled) -> Self {
        StorefrontError::Cancelled
    }
}

impl StorefrontError {
    /// Returns true if the user can usefully retry the same action.
    pub fn is_retryable(&self) -> bool {
        match self {
            StorefrontError::Api(err) => err.is_retryable(),
            StorefrontError::State(_) | StorefrontError::Cancelled => true,
            StorefrontError::Validation(_)
            | StorefrontError::NoOrder
            | StorefrontError::UnknownPizza(_) => false,
        }
    }

    /// Returns a message suitable for showing to the user.
    ///
    /// Rejections, timeouts and connectivity problems get distinct wording;
    /// the technical detail stays in the `Display` form for logs.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Validation(DomainError::EmptyCart) => {
                "Your cart is empty. Add a pizza before checking out.".to_string()
            }
            StorefrontError::Validation(err) => format!("Please check your input: {err}."),
            StorefrontError::NoOrder => NO_ORDER_MESSAGE.to_string(),
            StorefrontError::UnknownPizza(id) => format!("\"{id}\" is not on the menu."),
            StorefrontError::Api(err) => client_message(err),
            StorefrontError::State(_) => {
                "Could not access saved data on this device. Please try again.".to_string()
            }
            StorefrontError::Cancelled => "The request was cancelled.".to_string(),
        }
    }
}

fn client_message(err: &ClientError) -> String {
    match err {
        ClientError::Timeout => {
            "The server took too long to respond. Please try again.".to_string()
        }
        ClientError::Network(_) => "Could not reach the server. Please try again.".to_string(),
        ClientError::Server { .. } | ClientError::Decode(_) => {
            "The server could not process the request. Please try again.".to_string()
        }
        ClientError::NotFound(_) => "The order no longer exists on the server.".to_string(),
        ClientError::Rejected { message, .. } => format!("The request was rejected: {message}"),
        ClientError::InvalidUrl(_) => "The server address is misconfigured.".to_string(),
        ClientError::Domain(err) => format!("Please check your input: {err}."),
    }
}

/// Result type for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;

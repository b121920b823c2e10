//! Order status as reported by the backend.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// The status of an order in the kitchen and delivery pipeline.
///
/// Status transitions driven by the backend:
/// ```text
/// New ──► InPreparation ──► OutForDelivery ──► Delivered
/// ```
///
/// The set is backend-defined, so codes this client does not know are kept
/// verbatim in [`OrderStatus::Other`] instead of failing the whole order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Order received, not started.
    #[default]
    New,

    /// Kitchen is preparing the order.
    InPreparation,

    /// Order left for delivery.
    OutForDelivery,

    /// Order delivered (terminal state).
    Delivered,

    /// A status code this client does not recognise.
    Other(String),
}

impl OrderStatus {
    /// Maps a backend code to a status, keeping unknown codes.
    pub fn from_code(code: &str) -> Self {
        match code {
            "NOVO" => OrderStatus::New,
            "EM_PREPARO" => OrderStatus::InPreparation,
            "SAIU_ENTREGA" => OrderStatus::OutForDelivery,
            "ENTREGUE" => OrderStatus::Delivered,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    /// Returns the backend code.
    pub fn code(&self) -> &str {
        match self {
            OrderStatus::New => "NOVO",
            OrderStatus::InPreparation => "EM_PREPARO",
            OrderStatus::OutForDelivery => "SAIU_ENTREGA",
            OrderStatus::Delivered => "ENTREGUE",
            OrderStatus::Other(code) => code,
        }
    }

    /// Returns the next status in the pipeline, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::InPreparation),
            OrderStatus::InPreparation => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Other(_) => None,
        }
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InPreparation => "In preparation",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Other(code) => code,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for OrderStatus {
    fn from(code: String) -> Self {
        OrderStatus::from_code(&code)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.code().to_string()
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = DomainError;

    /// Strict parse used for user input: only known codes are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match OrderStatus::from_code(&s.trim().to_ascii_uppercase()) {
            OrderStatus::Other(_) => Err(DomainError::UnknownStatus(s.to_string())),
            known => Ok(known),
        }
    }
}

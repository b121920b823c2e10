//! Payment methods.

use crate::DomainError;

/// Payment methods accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    #[default]
    Pix,
    Card,
    Cash,
}

impl PaymentMethod {
    /// Every accepted method, in display order.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Pix,
        PaymentMethod::Card,
        PaymentMethod::Cash,
    ];

    /// Returns the code the backend expects (`PIX`, `CARTAO`, `DINHEIRO`).
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Card => "CARTAO",
            PaymentMethod::Cash => "DINHEIRO",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = DomainError;

    /// Accepts backend codes and English names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PIX" => Ok(PaymentMethod::Pix),
            "CARTAO" | "CARD" => Ok(PaymentMethod::Card),
            "DINHEIRO" | "CASH" => Ok(PaymentMethod::Cash),
            _ => Err(DomainError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

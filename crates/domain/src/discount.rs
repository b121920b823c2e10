//! Discount descriptors sent with a new order.

use common::Money;

use crate::DomainError;

/// Which discount rule the backend should apply when creating an order.
///
/// The client never computes the discount itself; it only names the rule and
/// its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discount {
    /// A fraction of the subtotal, in `[0, 1]`.
    Percentage { fraction: f64 },

    /// A fixed amount off once the subtotal reaches `minimum`.
    MinimumThreshold {
        minimum: Money,
        fixed_discount: Money,
    },
}

impl Discount {
    /// Creates a percentage discount. `fraction` must be finite and in `[0, 1]`.
    pub fn percentage(fraction: f64) -> Result<Self, DomainError> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(DomainError::InvalidDiscount(format!(
                "percentage must be between 0 and 1, got {fraction}"
            )));
        }
        Ok(Self::Percentage { fraction })
    }

    /// Creates a minimum-threshold discount. Both amounts must be non-negative.
    pub fn minimum_threshold(minimum: Money, fixed_discount: Money) -> Result<Self, DomainError> {
        if minimum.is_negative() || fixed_discount.is_negative() {
            return Err(DomainError::InvalidDiscount(
                "threshold amounts must not be negative".to_string(),
            ));
        }
        Ok(Self::MinimumThreshold {
            minimum,
            fixed_discount,
        })
    }

    /// Returns the rule name.
    pub fn kind(&self) -> &'static str {
        match self {
            Discount::Percentage { .. } => "percentage",
            Discount::MinimumThreshold { .. } => "minimum_threshold",
        }
    }
}

impl std::fmt::Display for Discount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discount::Percentage { fraction } => {
                let percent = (fraction * 10_000.0).round() / 100.0;
                write!(f, "{percent}% off")
            }
            Discount::MinimumThreshold {
                minimum,
                fixed_discount,
            } => write!(f, "{fixed_discount} off orders from {minimum}"),
        }
    }
}

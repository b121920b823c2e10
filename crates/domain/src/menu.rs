//! Catalog entries.

use common::{Money, PizzaId};
use serde::{Deserialize, Serialize};

/// A pizza offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: PizzaId,
    pub name: String,
    pub price: Money,
}

impl MenuItem {
    /// Creates a new menu item.
    pub fn new(id: impl Into<PizzaId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.id, self.price)
    }
}

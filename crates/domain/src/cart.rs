//! The shopping cart.

use std::collections::HashSet;

use common::{Money, PizzaId};
use serde::{Deserialize, Serialize};

use crate::{DomainError, MenuItem};

/// One line of the cart: a menu item and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartEntry {
    /// Returns `item.price * quantity`.
    pub fn line_total(&self) -> Money {
        self.item.price.multiply(self.quantity)
    }
}

/// Ordered collection of cart entries, at most one per pizza.
///
/// Entries keep the order in which pizzas were first added. Every entry has
/// a quantity of at least one; decrementing the last unit removes the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from existing entries, checking the cart invariants.
    pub fn from_entries(entries: Vec<CartEntry>) -> Result<Self, DomainError> {
        let cart = Self { entries };
        cart.validate()?;
        Ok(cart)
    }

    /// Adds one unit of `item`.
    ///
    /// Increments the existing entry for the same pizza, or appends a new
    /// entry with quantity 1. Returns the entry's new quantity.
    pub fn add_item(&mut self, item: &MenuItem) -> u32 {
        if let Some(entry) = self.entry_mut(&item.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }

        self.entries.push(CartEntry {
            item: item.clone(),
            quantity: 1,
        });
        1
    }

    /// Removes one unit of the given pizza.
    ///
    /// Returns the remaining quantity (0 when the entry was dropped), or
    /// `None` if the pizza was not in the cart.
    pub fn decrement(&mut self, pizza_id: &PizzaId) -> Option<u32> {
        let position = self.entries.iter().position(|e| &e.item.id == pizza_id)?;
        let entry = &mut self.entries[position];
        if entry.quantity > 1 {
            entry.quantity -= 1;
            return Some(entry.quantity);
        }

        self.entries.remove(position);
        Some(0)
    }

    /// Removes the whole entry for a pizza. Returns true if it was present.
    pub fn remove(&mut self, pizza_id: &PizzaId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.item.id != pizza_id);
        self.entries.len() != before
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of `price * quantity` over all entries; zero when empty.
    pub fn subtotal(&self) -> Money {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Returns the quantity held for a pizza (0 if absent).
    pub fn quantity_of(&self, pizza_id: &PizzaId) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.item.id == pizza_id)
            .map_or(0, |e| e.quantity)
    }

    /// Returns the total number of units across all entries.
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Returns the number of distinct pizzas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks the cart invariants: positive quantities, non-negative prices,
    /// and one entry per pizza.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if entry.quantity == 0 {
                return Err(DomainError::InvalidCart(format!(
                    "zero quantity for {}",
                    entry.item.id
                )));
            }
            if entry.item.price.is_negative() {
                return Err(DomainError::InvalidCart(format!(
                    "negative price for {}",
                    entry.item.id
                )));
            }
            if !seen.insert(&entry.item.id) {
                return Err(DomainError::InvalidCart(format!(
                    "duplicate entry for {}",
                    entry.item.id
                )));
            }
        }
        Ok(())
    }

    fn entry_mut(&mut self, pizza_id: &PizzaId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| &e.item.id == pizza_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza(id: &str, cents: i64) -> MenuItem {
        MenuItem::new(id, id.to_uppercase(), Money::from_cents(cents))
    }

    #[test]
    fn test_add_item_appends_then_increments() {
        let mut cart = Cart::new();
        let margherita = pizza("margherita", 3000);

        assert_eq!(cart.add_item(&margherita), 1);
        assert_eq!(cart.add_item(&margherita), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&margherita.id), 2);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&pizza("b", 100));
        cart.add_item(&pizza("a", 100));
        cart.add_item(&pizza("b", 100));

        let ids: Vec<_> = cart.entries().iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_subtotal_empty_is_zero() {
        assert!(Cart::new().subtotal().is_zero());
    }

    #[test]
    fn test_subtotal_sums_price_times_quantity() {
        let mut cart = Cart::new();
        let ten = pizza("ten", 1000);
        let five = pizza("five", 500);
        cart.add_item(&ten);
        cart.add_item(&ten);
        cart.add_item(&five);

        assert_eq!(cart.subtotal(), Money::from_cents(2500));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_decrement_to_zero_removes_entry() {
        let mut cart = Cart::new();
        let p = pizza("p1", 1000);
        cart.add_item(&p);
        cart.add_item(&p);

        assert_eq!(cart.decrement(&p.id), Some(1));
        assert_eq!(cart.decrement(&p.id), Some(0));
        assert!(cart.is_empty());
        assert_eq!(cart.decrement(&p.id), None);
    }

    #[test]
    fn test_remove_drops_whole_entry() {
        let mut cart = Cart::new();
        let p = pizza("p1", 1000);
        cart.add_item(&p);
        cart.add_item(&p);

        assert!(cart.remove(&p.id));
        assert!(!cart.remove(&p.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_quantity_and_duplicates() {
        let p = pizza("p1", 1000);
        let zero = vec![CartEntry {
            item: p.clone(),
            quantity: 0,
        }];
        assert!(matches!(
            Cart::from_entries(zero),
            Err(DomainError::InvalidCart(_))
        ));

        let dup = vec![
            CartEntry {
                item: p.clone(),
                quantity: 1,
            },
            CartEntry {
                item: p,
                quantity: 2,
            },
        ];
        assert!(matches!(
            Cart::from_entries(dup),
            Err(DomainError::InvalidCart(_))
        ));
    }

    #[test]
    fn test_serialized_form_is_entry_array() {
        let mut cart = Cart::new();
        cart.add_item(&pizza("p1", 1000));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["item"]["id"], "p1");
    }
}

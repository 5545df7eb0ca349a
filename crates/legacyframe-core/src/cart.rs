//! # Cart Module
//!
//! The in-memory shopping cart and its quantity rules.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Page Action              Cart Method              Effect               │
//! │  ───────────              ───────────              ──────               │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_item(item, n) ────► merge or append      │
//! │                                                                         │
//! │  "+" button ─────────────► increase_item(id) ────► quantity + 1         │
//! │                                                                         │
//! │  "−" button ─────────────► decrease_item(id) ────► quantity − 1, ≥ 1    │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item(id) ──────► line removed         │
//! │                                                                         │
//! │  "Empty cart" ───────────► clear() ──────────────► no lines             │
//! │                                                                         │
//! │  Unknown ids are no-ops. Nothing here returns an error.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This type knows nothing about persistence; `legacyframe-store` wraps it
//! in a `CartStore` that mirrors every mutation to the durable slot.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartTotals, LineItem, NewLineItem};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same product increases quantity)
/// - Every quantity is at least 1
/// - Line order is insertion order, which is also display order
///
/// Serializes as the bare array of lines, i.e. the snapshot layout.
/// Deserializing goes through [`Cart::from_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from previously persisted lines.
    ///
    /// Lines sharing an id are merged into the first occurrence (quantities
    /// summed), zero-quantity lines are dropped and negative prices become
    /// zero, so the result always satisfies the cart invariants whatever the
    /// input looked like.
    pub fn from_lines(lines: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Cart::new();
        for mut line in lines {
            if line.quantity == 0 {
                continue;
            }
            line.unit_price = line.unit_price.map(|price| price.max(Money::zero()));
            match cart.find_mut(&line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.items.push(line),
            }
        }
        cart
    }

    /// Adds a product, or increases its quantity if already present.
    ///
    /// A quantity of zero is treated as one. When the product is already in
    /// the cart only the quantity changes; the stored name, image and price
    /// stay as they were first added.
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(existing) = self.find_mut(&item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(item.into_line(quantity));
    }

    /// Removes the line with `id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != initial_len
    }

    /// Adds one unit to the line with `id`. Returns whether it was found.
    pub fn increase_item(&mut self, id: &str) -> bool {
        match self.find_mut(id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Takes one unit off the line with `id`, never going below 1.
    ///
    /// Returns whether the quantity changed. Decreasing a single unit is a
    /// no-op; removing a line is always an explicit [`Cart::remove_item`].
    pub fn decrease_item(&mut self, id: &str) -> bool {
        match self.find_mut(id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price × quantity, missing prices counting as zero.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// All derived figures at once.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            line_count: self.line_count(),
            count: self.count(),
            total: self.total(),
        }
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| line.id == id)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(lines: Vec<LineItem>) -> Self {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: &str, price: i64) -> NewLineItem {
        NewLineItem::new(id, format!("Frame {id}")).with_price(Money::new(price))
    }

    #[test]
    fn test_add_same_item_merges_quantity() {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("1", "Frame").with_price(Money::new(20000)), 1);
        cart.add_item(NewLineItem::new("1", "Frame").with_price(Money::new(20000)), 1);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, 2);
        assert_eq!(cart.total(), Money::new(40000));
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_repeated_adds_sum_quantities() {
        let mut cart = Cart::new();
        for qty in [3, 1, 4, 1, 5] {
            cart.add_item(frame("7", 100), qty);
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("7").unwrap().quantity, 14);
    }

    #[test]
    fn test_add_zero_quantity_is_clamped_to_one() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 100), 0);
        assert_eq!(cart.get("1").unwrap().quantity, 1);

        cart.add_item(frame("1", 100), 0);
        assert_eq!(cart.get("1").unwrap().quantity, 2);
    }

    #[test]
    fn test_add_keeps_first_seen_details() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 100), 1);
        cart.add_item(NewLineItem::new("1", "Renamed").with_price(Money::new(999)), 1);

        let line = cart.get("1").unwrap();
        assert_eq!(line.name, "Frame 1");
        assert_eq!(line.unit_price, Some(Money::new(100)));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add_item(frame("b", 1), 1);
        cart.add_item(frame("a", 1), 1);
        cart.add_item(frame("c", 1), 1);
        cart.add_item(frame("a", 1), 1);

        let ids: Vec<&str> = cart.items().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_decrease_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item(frame("2", 1000), 1);

        assert!(!cart.decrease_item("2"));
        assert!(!cart.decrease_item("2"));

        let line = cart.get("2").unwrap();
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_decrease_then_increase() {
        let mut cart = Cart::new();
        cart.add_item(frame("2", 1000), 3);

        assert!(cart.decrease_item("2"));
        assert_eq!(cart.get("2").unwrap().quantity, 2);

        assert!(cart.increase_item("2"));
        assert_eq!(cart.get("2").unwrap().quantity, 3);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 500), 2);
        let before = cart.clone();

        assert!(!cart.remove_item("missing"));
        assert!(!cart.increase_item("missing"));
        assert!(!cart.decrease_item("missing"));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 500), 2);
        cart.add_item(frame("2", 700), 1);

        assert!(cart.remove_item("1"));
        assert!(cart.get("1").is_none());
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total(), Money::new(700));
    }

    #[test]
    fn test_totals_ignore_missing_prices() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 250), 2);
        cart.add_item(NewLineItem::new("2", "Made to measure"), 3);

        assert_eq!(
            cart.totals(),
            CartTotals {
                line_count: 2,
                count: 5,
                total: Money::new(500),
            }
        );
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 999), 2);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 1), u32::MAX);
        cart.add_item(frame("1", 1), 10);
        assert!(cart.increase_item("1"));
        assert_eq!(cart.get("1").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_from_lines_merges_duplicates_and_drops_zero() {
        let lines = vec![
            frame("1", 100).into_line(2),
            frame("2", 200).into_line(0),
            frame("1", 100).into_line(3),
            frame("3", 300).into_line(1),
        ];
        let cart = Cart::from_lines(lines);

        let summary: Vec<(&str, u32)> = cart
            .items()
            .iter()
            .map(|l| (l.id.as_str(), l.quantity))
            .collect();
        assert_eq!(summary, [("1", 5), ("3", 1)]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 100), 1);

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "1");
    }

    #[test]
    fn test_deserialize_upholds_invariants() {
        let json = serde_json::json!([
            {"id": "1", "name": "Frame", "price": 100, "quantity": 2},
            {"id": "2", "name": "Mat", "quantity": 0},
            {"id": "1", "name": "Frame", "price": 100, "quantity": 3},
            {"id": "3", "name": "Hook", "price": -4, "quantity": 1}
        ]);
        let cart: Cart = serde_json::from_value(json).unwrap();

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.get("1").unwrap().quantity, 5);
        assert!(cart.get("2").is_none());
        assert_eq!(cart.get("3").unwrap().unit_price, Some(Money::zero()));
    }

    #[test]
    fn test_negative_price_counts_as_zero() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", -300), 2);
        cart.add_item(frame("2", 100), 1);

        assert_eq!(cart.get("1").unwrap().unit_price, Some(Money::zero()));
        assert_eq!(cart.total(), Money::new(100));
    }

    #[test]
    fn test_fractional_prices_total_exactly() {
        let mut cart = Cart::new();
        cart.add_item(frame("1", 20000), 2);
        cart.add_item(
            NewLineItem::new("2", "Mat").with_price(Money::from_f64(19.99).unwrap()),
            3,
        );

        assert_eq!(cart.total(), Money::from_f64(40059.97).unwrap());
    }
}

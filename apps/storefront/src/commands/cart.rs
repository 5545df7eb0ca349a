//! # Cart Commands
//!
//! Commands behind the product cards, the cart badge and the cart page.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ (email)  │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                   complete_checkout      │
//! │                   increase / decrease           (checkout.rs)          │
//! │                   remove_from_cart                        │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these fail: unknown ids are no-ops and a failed write to the
//! slot only logs a warning.

use legacyframe_core::{Cart, CartTotals, LineItem, NewLineItem, DEFAULT_ADD_QUANTITY};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::CartState;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

fn snapshot(cart: &CartState) -> CartResponse {
    cart.with_cart(|c| CartResponse::from(c))
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated totals
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    snapshot(cart)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: appended with the given name, image and price
/// - Quantity defaults to 1; zero is treated as 1
pub fn add_to_cart(cart: &CartState, item: NewLineItem, quantity: Option<u32>) -> CartResponse {
    let quantity = quantity.unwrap_or(DEFAULT_ADD_QUANTITY);
    debug!(id = %item.id, quantity, "add_to_cart command");

    cart.with_store_mut(|store| store.add_item(item, quantity));
    snapshot(cart)
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, id: &str) -> CartResponse {
    debug!(id, "remove_from_cart command");
    cart.with_store_mut(|store| store.remove_item(id));
    snapshot(cart)
}

/// Adds one unit to a line.
pub fn increase_cart_item(cart: &CartState, id: &str) -> CartResponse {
    debug!(id, "increase_cart_item command");
    cart.with_store_mut(|store| store.increase_item(id));
    snapshot(cart)
}

/// Takes one unit off a line. A line at quantity 1 stays at 1; removal is
/// always explicit.
pub fn decrease_cart_item(cart: &CartState, id: &str) -> CartResponse {
    debug!(id, "decrease_cart_item command");
    cart.with_store_mut(|store| store.decrease_item(id));
    snapshot(cart)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_store_mut(|store| store.clear());
    snapshot(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use legacyframe_core::{Money, CART_STORAGE_KEY};
    use legacyframe_store::{MemorySlotStore, SlotStore};
    use std::sync::Arc;

    fn frame() -> NewLineItem {
        NewLineItem::new("1", "Frame").with_price(Money::new(20000))
    }

    #[test]
    fn test_add_same_item_twice() {
        let cart = CartState::open(MemorySlotStore::new());

        add_to_cart(&cart, frame(), None);
        let response = add_to_cart(&cart, frame(), None);

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.totals.count, 2);
        assert_eq!(response.totals.total, Money::new(40000));
    }

    #[test]
    fn test_decrease_floors_at_one() {
        let cart = CartState::open(MemorySlotStore::new());
        add_to_cart(
            &cart,
            NewLineItem::new("2", "Mat").with_price(Money::new(1000)),
            None,
        );

        decrease_cart_item(&cart, "2");
        let response = decrease_cart_item(&cart, "2");

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 1);
    }

    #[test]
    fn test_increase_remove_and_clear() {
        let cart = CartState::open(MemorySlotStore::new());
        add_to_cart(&cart, frame(), Some(0));
        add_to_cart(&cart, NewLineItem::new("7", "Custom size"), Some(3));

        let response = increase_cart_item(&cart, "1");
        assert_eq!(response.totals.count, 5);
        assert_eq!(response.totals.line_count, 2);

        let response = remove_from_cart(&cart, "1");
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total, Money::zero());

        assert_eq!(remove_from_cart(&cart, "missing"), response);
        assert_eq!(increase_cart_item(&cart, "missing"), response);

        let response = clear_cart(&cart);
        assert!(response.items.is_empty());
        assert_eq!(response.totals.count, 0);
    }

    #[test]
    fn test_mutations_reach_the_slot() {
        let slot = Arc::new(MemorySlotStore::new());
        let cart = CartState::open(Arc::clone(&slot));

        add_to_cart(&cart, frame(), Some(2));

        let raw = slot.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"id":"1","name":"Frame","price":20000,"quantity":2}]"#);
    }

    #[test]
    fn test_response_shape() {
        let cart = CartState::open(MemorySlotStore::new());
        let json = serde_json::to_value(add_to_cart(&cart, frame(), None)).unwrap();

        assert_eq!(json["items"][0]["price"], 20000);
        assert_eq!(json["totals"]["count"], 1);
        assert_eq!(json["totals"]["lineCount"], 1);
        assert_eq!(json["totals"]["total"], 20000);
    }
}

//! # Cart Store
//!
//! The authoritative in-memory cart plus its durable mirror.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CartStore Lifecycle                               │
//! │                                                                         │
//! │  Application start                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore::open(slot)                                                  │
//! │       ├── slot empty ─────────────────────────► empty cart              │
//! │       ├── read fails / bad JSON / bad shape ──► empty cart (warn!)      │
//! │       └── valid snapshot ─────────────────────► restored cart           │
//! │                                                                         │
//! │  Every mutation (add / remove / increase / decrease / clear)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  update Cart in memory ──► persist() ──► Err? warn! and carry on        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No method returns an error to the caller except [`CartStore::persist`],
//! which exists so the best-effort contract is visible at the call site.

use legacyframe_core::{Cart, CartTotals, LineItem, Money, NewLineItem, CART_STORAGE_KEY};
use tracing::{debug, info, warn};

use crate::error::PersistResult;
use crate::slot::SlotStore;
use crate::snapshot;

/// Cart with write-through persistence to a durable slot.
///
/// One instance is created at application start and handed to whatever
/// needs the cart; there is no global.
#[derive(Debug)]
pub struct CartStore<S: SlotStore> {
    cart: Cart,
    slot: S,
    key: String,
}

impl<S: SlotStore> CartStore<S> {
    /// Opens the cart stored under [`CART_STORAGE_KEY`].
    pub fn open(slot: S) -> Self {
        Self::open_with_key(slot, CART_STORAGE_KEY)
    }

    /// Opens the cart stored under a custom key.
    ///
    /// Missing, unreadable or invalid snapshots yield an empty cart. The slot
    /// is left untouched until the first mutation.
    pub fn open_with_key(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load_cart(&slot, &key);

        info!(
            key = %key,
            lines = cart.line_count(),
            units = cart.count(),
            "Cart restored"
        );

        CartStore { cart, slot, key }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` units of `item` (zero is treated as one).
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) {
        debug!(id = %item.id, quantity, "Adding item to cart");
        self.cart.add_item(item, quantity);
        self.persist_best_effort();
    }

    /// Removes the line with `id`, if present.
    pub fn remove_item(&mut self, id: &str) {
        let removed = self.cart.remove_item(id);
        debug!(id, removed, "Removing item from cart");
        self.persist_best_effort();
    }

    /// Adds one unit to the line with `id`, if present.
    pub fn increase_item(&mut self, id: &str) {
        let changed = self.cart.increase_item(id);
        debug!(id, changed, "Increasing item quantity");
        self.persist_best_effort();
    }

    /// Takes one unit off the line with `id`, never below one.
    pub fn decrease_item(&mut self, id: &str) {
        let changed = self.cart.decrease_item(id);
        debug!(id, changed, "Decreasing item quantity");
        self.persist_best_effort();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        debug!("Clearing cart");
        self.cart.clear();
        self.persist_best_effort();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.cart.get(id)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    /// Total units.
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// Sum of unit price × quantity.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// All derived figures.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Key of the durable slot this store mirrors to.
    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes the full snapshot to the slot.
    pub fn persist(&self) -> PersistResult<()> {
        let raw = snapshot::encode(self.cart.items())?;
        self.slot.put(&self.key, &raw)
    }

    /// Persists, discarding any failure. The in-memory cart stays correct;
    /// only durability is lost.
    fn persist_best_effort(&self) {
        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "Cart snapshot not persisted");
        }
    }
}

fn load_cart<S: SlotStore>(slot: &S, key: &str) -> Cart {
    let raw = match slot.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "Cart snapshot unreadable, starting empty");
            return Cart::new();
        }
    };

    match snapshot::decode(&raw) {
        Ok(lines) => Cart::from_lines(lines),
        Err(e) => {
            warn!(key, error = %e, "Cart snapshot discarded, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Cart State
//!
//! Shares the single `CartStore` with every command.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may read or modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Handlers may be invoked from any thread
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Page Action              Command                 CartStore Change      │
//! │  ───────────              ───────                 ────────────────      │
//! │                                                                         │
//! │  Add to cart ────────────► add_to_cart() ───────► add_item + persist   │
//! │                                                                         │
//! │  + / − buttons ──────────► increase/decrease ───► qty ± 1 + persist    │
//! │                                                                         │
//! │  Remove ─────────────────► remove_from_cart() ──► remove + persist     │
//! │                                                                         │
//! │  Order placed ───────────► complete_checkout() ─► clear + persist      │
//! │                                                                         │
//! │  Cart badge / page ──────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use legacyframe_core::Cart;
use legacyframe_store::{CartStore, SlotStore};

/// The slot type the storefront runs with, chosen at bootstrap.
pub type DynSlotStore = Box<dyn SlotStore>;

/// Thread-safe handle to the persistent cart.
#[derive(Debug, Clone)]
pub struct CartState {
    store: Arc<Mutex<CartStore<DynSlotStore>>>,
}

impl CartState {
    /// Opens the cart persisted in `slot`.
    pub fn open(slot: impl SlotStore + 'static) -> Self {
        Self::from_store(CartStore::open(Box::new(slot) as DynSlotStore))
    }

    /// Wraps an already opened store.
    pub fn from_store(store: CartStore<DynSlotStore>) -> Self {
        CartState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let total = cart_state.with_cart(|cart| cart.total());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(self.lock().cart())
    }

    /// Executes a function with write access to the store.
    ///
    /// Mutations go through the store so each one is persisted.
    ///
    /// ## Example
    /// ```rust,ignore
    /// cart_state.with_store_mut(|store| store.increase_item("1"));
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore<DynSlotStore>) -> R,
    {
        f(&mut *self.lock())
    }

    // A panic inside a closure cannot leave the cart half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, CartStore<DynSlotStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

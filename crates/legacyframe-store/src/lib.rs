//! # legacyframe-store: Durable Cart Storage
//!
//! This crate keeps the storefront cart in a durable key-value slot so it
//! survives reloads and restarts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Data Flow                                   │
//! │                                                                         │
//! │  Storefront command (add_to_cart)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  legacyframe-store (THIS CRATE)                 │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │───►│   snapshot    │───►│  SlotStore   │  │   │
//! │  │   │ (cart_store)  │    │ encode/decode │    │ memory, file │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/legacyframe_cart_v1.json                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`slot`] - `SlotStore` trait and the in-memory backend
//! - [`file`] - File-per-key backend
//! - [`snapshot`] - JSON layout of the persisted cart
//! - [`cart_store`] - `CartStore`, the cart with write-through persistence
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use legacyframe_core::{Money, NewLineItem};
//! use legacyframe_store::{CartStore, MemorySlotStore};
//!
//! let mut store = CartStore::open(MemorySlotStore::new());
//! store.add_item(NewLineItem::new("1", "Frame").with_price(Money::new(20000)), 1);
//! store.add_item(NewLineItem::new("1", "Frame").with_price(Money::new(20000)), 1);
//!
//! assert_eq!(store.count(), 2);
//! assert_eq!(store.total(), Money::new(40000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod error;
pub mod file;
pub mod slot;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::CartStore;
pub use error::{PersistError, PersistResult, SnapshotError};
pub use file::FileSlotStore;
pub use slot::{MemorySlotStore, SlotStore};

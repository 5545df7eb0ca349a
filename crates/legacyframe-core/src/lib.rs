//! # legacyframe-core: Pure Business Logic for the Legacyframe Storefront
//!
//! This crate holds the logic of the storefront client that has invariants
//! worth testing: the cart container, money arithmetic, the identity
//! snapshot and the checkout handoff payload. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Legacyframe Storefront Client                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Page components                            │   │
//! │  │    Listing ──► Detail ──► Cart drawer ──► Checkout ──► Admin    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (host layer)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             legacyframe-store (durable slot, CartStore)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ legacyframe-core (THIS CRATE) ★                    │   │
//! │  │   types · money · cart · checkout · validation                  │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, cart totals, identity
//! - [`money`] - Fixed-point Money type (no floating point arithmetic!)
//! - [`cart`] - The in-memory cart container and its quantity rules
//! - [`checkout`] - Order payload handed to the order service
//! - [`validation`] - Shape and input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use legacyframe_core::{Cart, Money, NewLineItem};
//!
//! let mut cart = Cart::new();
//! let frame = NewLineItem::new("1", "Frame").with_price(Money::new(20000));
//!
//! cart.add_item(frame.clone(), 1);
//! cart.add_item(frame, 1);
//!
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.total(), Money::new(40000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use checkout::{OrderLine, OrderRequest};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the durable slot holding the cart snapshot.
///
/// The `_v1` suffix is the only versioning the layout has; a breaking change
/// to the snapshot shape means a new key, not a migration.
pub const CART_STORAGE_KEY: &str = "legacyframe_cart_v1";

/// Quantity used when a caller adds an item without saying how many.
pub const DEFAULT_ADD_QUANTITY: u32 = 1;

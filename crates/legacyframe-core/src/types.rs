//! # Domain Types
//!
//! Core domain types used throughout the storefront client.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  NewLineItem    │   │    LineItem     │   │   CartTotals    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │   │  line_count     │       │
//! │  │  name           │   │  name           │   │  count          │       │
//! │  │  image?         │   │  image?         │   │  total          │       │
//! │  │  unit_price?    │   │  unit_price?    │   └─────────────────┘       │
//! │  └─────────────────┘   │  quantity ≥ 1   │                              │
//! │                        └─────────────────┘   ┌─────────────────┐       │
//! │                                              │    Identity     │       │
//! │                                              │  email, isAdmin │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Layout
//! `LineItem` serializes exactly as one entry of the durable cart snapshot:
//! `{ "id", "name", "image"?, "price"?, "quantity" }`. Optional fields are
//! omitted rather than written as `null`.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// New Line Item
// =============================================================================

/// A product as handed to the cart by a page component, before it has a
/// quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewLineItem {
    /// Stable product identifier from the catalog service.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Product image URL, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,

    /// Unit price in the catalog's price unit. `None` means the catalog
    /// only knows a price range; the item counts as free in totals.
    /// Negative prices are refused when parsed and count as zero once the
    /// item is in a cart.
    #[serde(
        rename = "price",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_negative_price"
    )]
    #[ts(type = "number | undefined")]
    pub unit_price: Option<Money>,
}

impl NewLineItem {
    /// Creates an item with no image and no known price.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        NewLineItem {
            id: id.into(),
            name: name.into(),
            image: None,
            unit_price: None,
        }
    }

    /// Sets the unit price. A negative price is stored as zero.
    pub fn with_price(mut self, price: Money) -> Self {
        self.unit_price = Some(price.max(Money::zero()));
        self
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attaches a quantity, producing a cart line.
    pub(crate) fn into_line(self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            image: self.image,
            unit_price: self.unit_price.map(|price| price.max(Money::zero())),
            quantity,
        }
    }
}

fn non_negative_price<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Money>::deserialize(deserializer)? {
        Some(price) if price.is_negative() => {
            Err(serde::de::Error::custom("price must not be negative"))
        }
        price => Ok(price),
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its quantity.
///
/// ## Invariants (upheld by [`Cart`](crate::cart::Cart))
/// - `quantity >= 1`
/// - no two lines in a cart share an `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
    #[serde(rename = "price", default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | undefined")]
    pub unit_price: Option<Money>,
    pub quantity: u32,
}

impl LineItem {
    /// Unit price × quantity, with a missing price counting as zero.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price
            .unwrap_or_default()
            .times_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived cart figures for badges and the cart drawer footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,
    /// Total units across all lines.
    #[ts(type = "number")]
    pub count: u64,
    /// Sum of line totals.
    #[ts(type = "number")]
    pub total: Money,
}

// =============================================================================
// Identity
// =============================================================================

/// The signed-in user as derived from the auth service's token.
///
/// Orders are keyed by `email`; `is_admin` gates the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email: String,
    pub is_admin: bool,
}

impl Identity {
    /// Creates an identity.
    pub fn new(email: impl Into<String>, is_admin: bool) -> Self {
        Identity {
            email: email.into(),
            is_admin,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Checkout Handoff
//!
//! Builds the payload the order service receives when a signed-in customer
//! checks out. The storefront never talks to the order service itself; the
//! hosting page posts this body and, on success, clears the cart.
//!
//! ```text
//! Cart ──► OrderRequest::from_cart(&cart, email) ──► JSON body ──► order service
//!                  │
//!                  ├── empty cart?        → CoreError::EmptyCart
//!                  └── malformed email?   → CoreError::Validation
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::validation::validate_email;

/// One ordered product, frozen from the cart at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | undefined")]
    pub price: Option<Money>,
    pub quantity: u32,
}

impl From<&LineItem> for OrderLine {
    fn from(line: &LineItem) -> Self {
        OrderLine {
            id: line.id.clone(),
            name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Order submission body, keyed by the customer's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Client-generated id so a retried submission can be recognised.
    #[ts(type = "string")]
    pub request_id: Uuid,
    pub email: String,
    pub items: Vec<OrderLine>,
    #[ts(type = "number")]
    pub item_count: u64,
    #[ts(type = "number")]
    pub total: Money,
}

impl OrderRequest {
    /// Snapshots `cart` into an order for `email`.
    ///
    /// ## Example
    /// ```rust
    /// use legacyframe_core::{Cart, Money, NewLineItem, OrderRequest};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(NewLineItem::new("1", "Frame").with_price(Money::new(20000)), 2);
    ///
    /// let order = OrderRequest::from_cart(&cart, "ana@example.com").unwrap();
    /// assert_eq!(order.total, Money::new(40000));
    /// assert_eq!(order.item_count, 2);
    /// ```
    pub fn from_cart(cart: &Cart, email: &str) -> CoreResult<Self> {
        validate_email(email)?;

        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(OrderRequest {
            request_id: Uuid::new_v4(),
            email: email.trim().to_string(),
            items: cart.items().iter().map(OrderLine::from).collect(),
            item_count: cart.count(),
            total: cart.total(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewLineItem;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(
            NewLineItem::new("1", "Frame")
                .with_price(Money::new(20000))
                .with_image("https://cdn.example/1.jpg"),
            2,
        );
        cart.add_item(NewLineItem::new("2", "Custom size"), 1);
        cart
    }

    #[test]
    fn test_order_snapshots_cart() {
        let order = OrderRequest::from_cart(&sample_cart(), "ana@example.com").unwrap();

        assert_eq!(order.email, "ana@example.com");
        assert_eq!(order.item_count, 3);
        assert_eq!(order.total, Money::new(40000));
        assert_eq!(
            order.items,
            vec![
                OrderLine {
                    id: "1".to_string(),
                    name: "Frame".to_string(),
                    price: Some(Money::new(20000)),
                    quantity: 2,
                },
                OrderLine {
                    id: "2".to_string(),
                    name: "Custom size".to_string(),
                    price: None,
                    quantity: 1,
                },
            ]
        );
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let result = OrderRequest::from_cart(&Cart::new(), "ana@example.com");
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let result = OrderRequest::from_cart(&sample_cart(), "not-an-email");
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let cart = sample_cart();
        let a = OrderRequest::from_cart(&cart, "ana@example.com").unwrap();
        let b = OrderRequest::from_cart(&cart, "ana@example.com").unwrap();
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let order = OrderRequest::from_cart(&sample_cart(), "ana@example.com").unwrap();
        let json = serde_json::to_value(&order).unwrap();

        assert!(json.get("requestId").is_some());
        assert_eq!(json["itemCount"], 3);
        assert_eq!(json["total"], 40000);
        assert!(json["items"][1].get("price").is_none());
    }
}

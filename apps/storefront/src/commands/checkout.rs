//! # Checkout Commands
//!
//! Hands the cart to the order service and empties it once the order is in.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  begin_checkout()                                                       │
//! │       │  require signed-in user ──── none? ──► UNAUTHENTICATED          │
//! │       │  OrderRequest::from_cart ─── empty? ─► EMPTY_CART               │
//! │       ▼                                                                 │
//! │  OrderRequest { requestId, email, items, itemCount, total }             │
//! │       │                                                                 │
//! │       ▼  (page submits it to the order service)                         │
//! │  complete_checkout(order) ──► cart cleared and persisted                │
//! │                                                                         │
//! │  Submission failed? Nothing to call: the cart is still intact.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use legacyframe_core::OrderRequest;
use tracing::{debug, info};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{CartState, SessionState};

/// Builds the order request for the signed-in user's cart.
///
/// The cart itself is not modified.
pub fn begin_checkout(session: &SessionState, cart: &CartState) -> Result<OrderRequest, ApiError> {
    debug!("begin_checkout command");
    let identity = session.require_user()?;

    let order = cart.with_cart(|c| OrderRequest::from_cart(c, &identity.email))?;

    info!(
        request_id = %order.request_id,
        email = %order.email,
        items = order.item_count,
        total = %order.total,
        "Checkout started"
    );
    Ok(order)
}

/// Clears the cart after the order service accepted `order`.
///
/// Only the user who began the checkout may complete it.
pub fn complete_checkout(
    session: &SessionState,
    cart: &CartState,
    order: &OrderRequest,
) -> Result<CartResponse, ApiError> {
    debug!(request_id = %order.request_id, "complete_checkout command");
    let identity = session.require_user()?;

    if !identity.email.eq_ignore_ascii_case(&order.email) {
        return Err(ApiError::forbidden("Order belongs to another user"));
    }

    cart.with_store_mut(|store| store.clear());
    info!(request_id = %order.request_id, "Checkout completed, cart cleared");

    Ok(cart.with_cart(|c| CartResponse::from(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenDecoder;
    use crate::error::ErrorCode;
    use crate::state::session::tests::token;
    use legacyframe_core::{Money, NewLineItem, CART_STORAGE_KEY};
    use legacyframe_store::{MemorySlotStore, SlotStore};
    use std::sync::Arc;

    fn signed_in(email: &str) -> SessionState {
        let session = SessionState::new(TokenDecoder::unverified());
        session.login(&token(email, false)).unwrap();
        session
    }

    fn filled_cart() -> CartState {
        let cart = CartState::open(MemorySlotStore::new());
        cart.with_store_mut(|store| {
            store.add_item(NewLineItem::new("1", "Frame").with_price(Money::new(20000)), 2);
            store.add_item(NewLineItem::new("2", "Mat").with_price(Money::new(1000)), 1);
        });
        cart
    }

    #[test]
    fn test_begin_checkout_snapshots_cart() {
        let session = signed_in("ana@example.com");
        let cart = filled_cart();

        let order = begin_checkout(&session, &cart).unwrap();
        assert_eq!(order.email, "ana@example.com");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.item_count, 3);
        assert_eq!(order.total, Money::new(41000));

        assert_eq!(cart.with_cart(|c| c.count()), 3);
    }

    #[test]
    fn test_begin_checkout_requires_user() {
        let session = SessionState::new(TokenDecoder::unverified());
        let err = begin_checkout(&session, &filled_cart()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn test_begin_checkout_refuses_empty_cart() {
        let session = signed_in("ana@example.com");
        let cart = CartState::open(MemorySlotStore::new());

        let err = begin_checkout(&session, &cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[test]
    fn test_complete_checkout_clears_and_persists() {
        let slot = Arc::new(MemorySlotStore::new());
        let cart = CartState::open(Arc::clone(&slot));
        cart.with_store_mut(|store| store.add_item(NewLineItem::new("1", "Frame"), 1));

        let session = signed_in("ana@example.com");
        let order = begin_checkout(&session, &cart).unwrap();

        let response = complete_checkout(&session, &cart, &order).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(slot.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_complete_checkout_for_another_user() {
        let cart = filled_cart();
        let order = begin_checkout(&signed_in("ana@example.com"), &cart).unwrap();

        let err = complete_checkout(&signed_in("bob@example.com"), &cart, &order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(cart.with_cart(|c| c.line_count()), 2);
    }
}

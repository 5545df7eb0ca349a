//! # Commands Module
//!
//! All commands exposed to the page components.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── session.rs   ◄─── Sign-in, sign-out, admin dashboard
//! ├── checkout.rs  ◄─── Order request handoff
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Only needs the session
//! fn login(session: &SessionState, token: &str) -> Result<Identity, ApiError>
//!
//! // Needs both
//! fn begin_checkout(session: &SessionState, cart: &CartState) -> Result<OrderRequest, ApiError>
//! ```
//!
//! The hosting application owns a [`crate::Storefront`] and passes its
//! fields in.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod session;

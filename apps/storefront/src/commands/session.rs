//! # Session Commands
//!
//! Sign-in, sign-out and the admin dashboard gate.
//!
//! ```text
//! login(token) ─────────► SessionState ──► Identity { email, isAdmin }
//!
//! admin_dashboard()
//!      ├── nobody signed in ──► UNAUTHENTICATED
//!      ├── not an admin ──────► FORBIDDEN
//!      └── admin ─────────────► AdminDashboard
//! ```

use legacyframe_core::{CartTotals, Identity};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState, SessionState};

/// What the admin dashboard shows on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub admin: Identity,
    pub store_name: String,
    /// The admin's own cart, as seen by the storefront
    pub cart: CartTotals,
}

/// Signs in with the token issued by the auth service.
pub fn login(session: &SessionState, token: &str) -> Result<Identity, ApiError> {
    debug!("login command");
    Ok(session.login(token)?)
}

/// Signs out. Returns whether anyone was signed in.
pub fn logout(session: &SessionState) -> bool {
    debug!("logout command");
    session.logout()
}

/// The signed-in user, if any.
pub fn current_identity(session: &SessionState) -> Option<Identity> {
    debug!("current_identity command");
    session.current()
}

/// Loads the admin dashboard. Admins only.
pub fn admin_dashboard(
    session: &SessionState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<AdminDashboard, ApiError> {
    debug!("admin_dashboard command");
    let admin = session.require_admin()?;

    Ok(AdminDashboard {
        admin,
        store_name: config.store_name.clone(),
        cart: cart.with_cart(|c| c.totals()),
    })
}

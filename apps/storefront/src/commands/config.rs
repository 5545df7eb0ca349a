//! # Config Commands
//!
//! Commands for retrieving application configuration.

use legacyframe_core::Money;
use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (store name in the header)
/// - Currency formatting on product cards and the cart page
///
/// ## Returns
/// Complete configuration state (read-only). The token secret is never
/// serialized.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Formats an amount the way prices are shown on the page.
pub fn format_price(config: &ConfigState, amount: Money) -> String {
    config.format_currency(amount)
}

//! # Legacyframe Storefront Library
//!
//! Host-side layer of the Legacyframe storefront: configuration, logging,
//! the persistent cart, the signed-in session and the commands page
//! components call.
//!
//! ## Module Organization
//! ```text
//! legacyframe_storefront/
//! ├── lib.rs          ◄─── You are here (bootstrap & tracing)
//! ├── auth.rs         ◄─── JWT decoding into an Identity
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Shared CartStore
//! │   ├── session.rs  ◄─── Signed-in user
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── session.rs  ◄─── Login, logout, admin dashboard
//! │   ├── checkout.rs ◄─── Order request handoff
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust
//! use legacyframe_core::{Money, NewLineItem};
//! use legacyframe_storefront::commands::cart;
//! use legacyframe_storefront::state::{ConfigState, StorageBackend};
//! use legacyframe_storefront::Storefront;
//!
//! let app = Storefront::bootstrap(ConfigState {
//!     storage: StorageBackend::Memory,
//!     ..ConfigState::default()
//! });
//!
//! let frame = NewLineItem::new("1", "Frame").with_price(Money::new(20000));
//! cart::add_to_cart(&app.cart, frame.clone(), None);
//! let response = cart::add_to_cart(&app.cart, frame, None);
//!
//! assert_eq!(response.totals.count, 2);
//! assert_eq!(app.config.format_currency(response.totals.total), "₩40000");
//! ```

pub mod auth;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use legacyframe_store::{FileSlotStore, MemorySlotStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use auth::TokenDecoder;
use state::{CartState, ConfigError, ConfigState, DynSlotStore, SessionState, StorageBackend};

/// Everything the page components need, built once at startup.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub cart: CartState,
    pub session: SessionState,
    pub config: ConfigState,
}

impl Storefront {
    /// Builds the storefront from `config`.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Storefront Startup                                │
    /// │                                                                         │
    /// │  1. Initialize Logging ───────────────────────────────────────────────► │
    /// │     • tracing-subscriber with env filter                                │
    /// │     • Default: info, legacyframe crates at debug; RUST_LOG overrides    │
    /// │                                                                         │
    /// │  2. Open the Cart Slot ───────────────────────────────────────────────► │
    /// │     • file: <data dir>/legacyframe_cart_v1.json                         │
    /// │     • memory, or file store unavailable: in-process only                │
    /// │                                                                         │
    /// │  3. Restore the Cart ─────────────────────────────────────────────────► │
    /// │     • invalid or missing snapshot: empty cart                           │
    /// │                                                                         │
    /// │  4. Session starts signed out ────────────────────────────────────────► │
    /// │     • tokens verified only when a JWT secret is configured              │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Never fails: storage problems degrade to an in-memory cart.
    pub fn bootstrap(config: ConfigState) -> Self {
        init_tracing();
        info!(store = %config.store_name, storage = ?config.storage, "Starting Legacyframe storefront");

        let cart = CartState::open(open_slot(&config));
        let session = SessionState::new(TokenDecoder::new(config.jwt_secret.clone()));

        info!("State initialized");
        Storefront {
            cart,
            session,
            config,
        }
    }

    /// Builds the storefront from `LEGACYFRAME_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::bootstrap(ConfigState::from_env()?))
    }
}

/// Opens the configured slot backend, falling back to memory.
fn open_slot(config: &ConfigState) -> DynSlotStore {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory cart storage");
            Box::new(MemorySlotStore::new())
        }
        StorageBackend::File => {
            let dir = match config.resolve_storage_dir() {
                Ok(dir) => dir,
                Err(error) => {
                    warn!(%error, "No storage directory, cart will not survive restarts");
                    return Box::new(MemorySlotStore::new());
                }
            };

            match FileSlotStore::open(dir.clone()) {
                Ok(store) => Box::new(store),
                Err(error) => {
                    warn!(%error, path = %dir.display(), "File storage unavailable, cart will not survive restarts");
                    Box::new(MemorySlotStore::new())
                }
            }
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=legacyframe_store=trace` - Trace one crate only
/// - Default: INFO, with legacyframe crates at DEBUG
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,legacyframe=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Platform data directory for the cart slot.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.legacyframe.storefront`
/// - **Windows**: `%APPDATA%\legacyframe\storefront\data`
/// - **Linux**: `~/.local/share/storefront`
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "legacyframe", "storefront").map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use legacyframe_core::{Money, NewLineItem};

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("legacyframe-storefront-{}", uuid::Uuid::new_v4()))
    }

    fn file_config(dir: &std::path::Path) -> ConfigState {
        ConfigState {
            storage: StorageBackend::File,
            storage_dir: Some(dir.to_path_buf()),
            ..ConfigState::default()
        }
    }

    #[test]
    fn test_memory_bootstrap_starts_empty() {
        let app = Storefront::bootstrap(ConfigState {
            storage: StorageBackend::Memory,
            ..ConfigState::default()
        });

        assert!(commands::cart::get_cart(&app.cart).items.is_empty());
        assert_eq!(app.session.current(), None);
    }

    #[test]
    fn test_cart_survives_restart_with_file_storage() {
        let dir = scratch_dir();

        let first = Storefront::bootstrap(file_config(&dir));
        commands::cart::add_to_cart(
            &first.cart,
            NewLineItem::new("1", "Frame").with_price(Money::new(20000)),
            Some(2),
        );
        drop(first);

        let second = Storefront::bootstrap(file_config(&dir));
        let response = commands::cart::get_cart(&second.cart);
        assert_eq!(response.totals.count, 2);
        assert_eq!(response.totals.total, Money::new(40000));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_unusable_storage_dir_falls_back_to_memory() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let app = Storefront::bootstrap(file_config(&blocker.join("slots")));
        let response =
            commands::cart::add_to_cart(&app.cart, NewLineItem::new("1", "Frame"), None);
        assert_eq!(response.totals.count, 1);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_secret_enables_verification() {
        let app = Storefront::bootstrap(ConfigState {
            storage: StorageBackend::Memory,
            jwt_secret: Some("s3cret".to_string()),
            ..ConfigState::default()
        });

        let unsigned = state::session::tests::token("ana@example.com", false);
        assert!(commands::session::login(&app.session, &unsigned).is_err());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}

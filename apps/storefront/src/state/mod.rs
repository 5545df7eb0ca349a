//! # State Module
//!
//! Manages storefront state, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront::bootstrap(config)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartState   │  │ SessionState │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<RwLock< │  │  store_name      │              │
//! │  │   CartStore  │  │   Option<    │  │  currency        │              │
//! │  │  >>          │  │    User>>>   │  │  storage, jwt    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • SessionState: Arc<RwLock<T>>, many readers, rare sign-ins           │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the state they need, so each can be tested alone.

mod cart;
mod config;
pub(crate) mod session;

pub use cart::{CartState, DynSlotStore};
pub use config::{ConfigError, ConfigState, StorageBackend};
pub use session::SessionState;

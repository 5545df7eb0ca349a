//! # Storage Error Types
//!
//! Error types for the durable slot and the snapshot codec.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure (io::Error, quota, ...)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistError (this module)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore::persist() returns it ──► mutators log it and move on       │
//! │                                                                         │
//! │  Unreadable snapshot                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotError ──► CartStore::open() logs it and starts empty          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither error ever reaches a page component: persistence is best-effort
//! and the in-memory cart stays authoritative.

use legacyframe_core::ValidationError;
use thiserror::Error;

/// Durable slot operation errors.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The backend cannot be used at all (e.g. storage disabled, private
    /// browsing, directory not creatable).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the backend's quota.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Key cannot be mapped onto the backend.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be serialized.
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a persisted snapshot could not be turned back into a cart.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not JSON, or not a JSON array.
    #[error("Snapshot is malformed: {0}")]
    Malformed(String),

    /// Well-formed JSON, but an entry does not have the line item shape.
    #[error("Snapshot item {index} is invalid: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Result type for slot operations.
pub type PersistResult<T> = Result<T, PersistError>;

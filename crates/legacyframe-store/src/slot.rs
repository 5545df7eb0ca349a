//! # Durable Slot Abstraction
//!
//! A minimal key-value interface standing in for the browser's local
//! storage. Values are whole strings; a write replaces the previous value.
//!
//! ```text
//! ┌──────────────────────────┐
//! │    trait SlotStore       │   get / put / remove
//! └────────────┬─────────────┘
//!      ┌───────┴──────────┐
//!      ▼                  ▼
//! MemorySlotStore    FileSlotStore
//! (tests, private    (one JSON file
//!  mode, quota)       per key)
//! ```
//!
//! All methods take `&self`; backends use interior mutability so one store
//! can be shared behind an `Arc`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{PersistError, PersistResult};

/// A durable key-value slot backend.
pub trait SlotStore: Send + Sync + Debug {
    /// Reads the value stored under `key`. `Ok(None)` if nothing is stored.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> PersistResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> PersistResult<()>;
}

impl<T: SlotStore + ?Sized> SlotStore for Box<T> {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> PersistResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> PersistResult<()> {
        (**self).remove(key)
    }
}

impl<T: SlotStore + ?Sized> SlotStore for Arc<T> {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> PersistResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> PersistResult<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory slot store.
///
/// Nothing survives the process. Used in tests and when durable storage is
/// switched off. An optional byte quota makes writes fail the way a full
/// browser storage area does.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemorySlotStore {
    /// Creates an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose total stored bytes (keys plus values)
    /// may not exceed `quota`.
    pub fn with_quota(quota: usize) -> Self {
        MemorySlotStore {
            slots: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Pre-populates a slot, bypassing the quota. Handy for seeding tests.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().insert(key.into(), value.into());
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic elsewhere cannot leave a HashMap insert half-done.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> PersistResult<()> {
        let mut slots = self.lock();

        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(PersistError::QuotaExceeded { needed, quota });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let store = MemorySlotStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.put("k", "v1").unwrap();
        store.put("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_keys_and_values() {
        let store = MemorySlotStore::with_quota(10);
        store.put("ab", "12345678").unwrap();

        let err = store.put("c", "1").unwrap_err();
        assert!(matches!(
            err,
            PersistError::QuotaExceeded {
                needed: 12,
                quota: 10
            }
        ));

        // Replacing an existing key only counts the new value.
        store.put("ab", "1234").unwrap();
        assert_eq!(store.get("ab").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_failed_put_keeps_previous_value() {
        let store = MemorySlotStore::with_quota(8).with_entry("k", "old");
        assert!(store.put("k", "far too long").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn test_boxed_and_shared_stores() {
        let boxed: Box<dyn SlotStore> = Box::new(MemorySlotStore::new());
        boxed.put("k", "v").unwrap();
        assert_eq!(boxed.get("k").unwrap().as_deref(), Some("v"));

        let shared: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
        let other = Arc::clone(&shared);
        shared.put("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }
}

//! # File Slot Backend
//!
//! Stores each slot as `<directory>/<key>.json`.
//!
//! ## Write Path
//! ```text
//! put("legacyframe_cart_v1", json)
//!      │
//!      ▼
//! write  <dir>/legacyframe_cart_v1.json.tmp
//!      │
//!      ▼
//! rename → <dir>/legacyframe_cart_v1.json   (atomic on the same filesystem)
//! ```
//!
//! A crash mid-write leaves at worst a stray `.tmp` file; the previous
//! snapshot stays readable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PersistError, PersistResult};
use crate::slot::SlotStore;

/// File extension used for slot files.
const SLOT_EXTENSION: &str = "json";

/// Longest key accepted; keeps file names well under common limits.
const MAX_KEY_LEN: usize = 128;

/// Slot store backed by one file per key in a directory.
///
/// ## Example
/// ```rust,ignore
/// let store = FileSlotStore::open("/var/lib/legacyframe")?;
/// store.put("legacyframe_cart_v1", "[]")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    directory: PathBuf,
}

impl FileSlotStore {
    /// Opens (creating if needed) the slot directory.
    pub fn open(directory: impl Into<PathBuf>) -> PersistResult<Self> {
        let directory = directory.into();

        fs::create_dir_all(&directory).map_err(|e| {
            PersistError::Unavailable(format!(
                "cannot create slot directory {}: {e}",
                directory.display()
            ))
        })?;

        info!(path = %directory.display(), "File slot store opened");
        Ok(FileSlotStore { directory })
    }

    /// Directory the slot files live in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn slot_path(&self, key: &str) -> PersistResult<PathBuf> {
        validate_key(key)?;
        Ok(self.directory.join(format!("{key}.{SLOT_EXTENSION}")))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> PersistResult<()> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(PersistError::InvalidKey(key.to_string()))
    }
}

impl SlotStore for FileSlotStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> PersistResult<()> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension(format!("{SLOT_EXTENSION}.tmp"));

        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(key, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistResult<()> {
        let path = self.slot_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("legacyframe-slots-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = scratch_dir();
        let store = FileSlotStore::open(&dir).unwrap();

        assert_eq!(store.get("legacyframe_cart_v1").unwrap(), None);

        store.put("legacyframe_cart_v1", "[]").unwrap();
        assert!(dir.join("legacyframe_cart_v1.json").exists());
        assert!(!dir.join("legacyframe_cart_v1.json.tmp").exists());
        assert_eq!(
            store.get("legacyframe_cart_v1").unwrap().as_deref(),
            Some("[]")
        );

        store.remove("legacyframe_cart_v1").unwrap();
        store.remove("legacyframe_cart_v1").unwrap();
        assert_eq!(store.get("legacyframe_cart_v1").unwrap(), None);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = scratch_dir();
        FileSlotStore::open(&dir).unwrap().put("k", "v").unwrap();

        let reopened = FileSlotStore::open(&dir).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_rejects_unsafe_keys() {
        let dir = scratch_dir();
        let store = FileSlotStore::open(&dir).unwrap();
        let long = "k".repeat(200);

        for key in ["", "../escape", "a/b", ".hidden", "white space", long.as_str()] {
            assert!(
                matches!(store.put(key, "x"), Err(PersistError::InvalidKey(_))),
                "accepted {key:?}"
            );
            assert!(store.get(key).is_err());
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_open_fails_when_path_is_a_file() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let result = FileSlotStore::open(file.join("slots"));
        assert!(matches!(result, Err(PersistError::Unavailable(_))));

        fs::remove_dir_all(dir).unwrap();
    }
}

//! # Snapshot Codec
//!
//! Converts between cart lines and the persisted JSON layout:
//!
//! ```json
//! [
//!   { "id": "1", "name": "Frame", "image": "https://…", "price": 20000, "quantity": 2 },
//!   { "id": "7", "name": "Custom size", "quantity": 1 }
//! ]
//! ```
//!
//! Decoding is strict: the value must be an array and every entry must pass
//! [`validate_snapshot_entry`]. Partially valid snapshots are rejected as a
//! whole.

use legacyframe_core::validation::validate_snapshot_entry;
use legacyframe_core::LineItem;
use serde_json::Value;

use crate::error::{PersistResult, SnapshotError};

/// Serializes lines into the snapshot layout.
pub fn encode(lines: &[LineItem]) -> PersistResult<String> {
    Ok(serde_json::to_string(lines)?)
}

/// Parses and validates a persisted snapshot.
pub fn decode(raw: &str) -> Result<Vec<LineItem>, SnapshotError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SnapshotError::Malformed(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Err(SnapshotError::Malformed("expected a JSON array".to_string()));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            validate_snapshot_entry(entry).map_err(|source| SnapshotError::InvalidItem { index, source })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Shape validation for persisted cart entries and checkout input.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Durable slot ──► JSON parse ──► validate_snapshot_entry() per entry    │
//! │                                       │                                 │
//! │                                       ├── any entry invalid?            │
//! │                                       │     → whole snapshot discarded  │
//! │                                       └── all valid → Cart::from_lines  │
//! │                                                                         │
//! │  Checkout ──► validate_email() ──► OrderRequest                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot can be edited by anything with access to the storage
//! origin, so well-formed JSON is not enough: an entry without an `id` would
//! otherwise break the one-line-per-id invariant. The rules accept every
//! entry a cart can save, so a save followed by a load never loses lines.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest email accepted for checkout (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// Snapshot Validators
// =============================================================================

/// Validates one entry of a persisted snapshot and converts it to a line.
///
/// ## Rules
/// - must be a JSON object
/// - `id`: string (any length, empty included)
/// - `name`: string
/// - `image`: absent, `null`, or string
/// - `price`: absent, `null`, or a finite non-negative number
/// - `quantity`: integer between 1 and `u32::MAX`
///
/// Unknown keys are ignored.
///
/// ## Example
/// ```rust
/// use legacyframe_core::validation::validate_snapshot_entry;
///
/// let entry = serde_json::json!({"id": "1", "name": "Frame", "price": 20000, "quantity": 2});
/// let line = validate_snapshot_entry(&entry).unwrap();
/// assert_eq!(line.quantity, 2);
///
/// let missing_id = serde_json::json!({"name": "Frame", "quantity": 1});
/// assert!(validate_snapshot_entry(&missing_id).is_err());
/// ```
pub fn validate_snapshot_entry(entry: &Value) -> ValidationResult<LineItem> {
    let object = entry
        .as_object()
        .ok_or_else(|| ValidationError::invalid_format("item", "must be an object"))?;

    let id = required_str(object, "id")?;
    let name = required_str(object, "name")?;
    let image = optional_str(object, "image")?;
    let unit_price = optional_price(object)?;
    let quantity = validate_quantity(object.get("quantity"))?;

    Ok(LineItem {
        id: id.to_string(),
        name: name.to_string(),
        image,
        unit_price,
        quantity,
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a str> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::required(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::invalid_format(field, "must be a string")),
    }
}

fn optional_str(object: &Map<String, Value>, field: &str) -> ValidationResult<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::invalid_format(field, "must be a string")),
    }
}

fn optional_price(object: &Map<String, Value>) -> ValidationResult<Option<Money>> {
    let value = match object.get("price") {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let number = match value {
        Value::Number(number) => number,
        _ => return Err(ValidationError::invalid_format("price", "must be a number")),
    };

    if number.as_f64().is_some_and(|price| price < 0.0) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Money::from_json_number(number)
        .map(Some)
        .ok_or_else(|| ValidationError::invalid_format("price", "must be finite"))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a persisted quantity.
///
/// ## Rules
/// - Must be present and an integer
/// - Must be positive (> 0); a zero line would violate the cart invariant
/// - Must fit in `u32`
fn validate_quantity(value: Option<&Value>) -> ValidationResult<u32> {
    let value = value.ok_or_else(|| ValidationError::required("quantity"))?;

    if let Some(signed) = value.as_i64() {
        if signed <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
    }

    let raw = value
        .as_u64()
        .ok_or_else(|| ValidationError::invalid_format("quantity", "must be a whole number"))?;

    u32::try_from(raw).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates the email an order is keyed by.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_EMAIL_LEN`] characters
/// - Exactly one `@` with something on both sides, no whitespace
///
/// ## Example
/// ```rust
/// use legacyframe_core::validation::validate_email;
///
/// assert!(validate_email("ana@example.com").is_ok());
/// assert!(validate_email("ana").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::invalid_format(
            "email",
            "must look like name@domain",
        ));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

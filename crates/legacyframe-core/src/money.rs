//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: integer ten-thousandths of a price unit                  │
//! │    price 20000  ──► 200000000   (whole amounts stay exact)              │
//! │    price 19.99  ──►    199900   (up to 4 decimals stay exact)           │
//! │    sums and products are integer arithmetic                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog sends prices as plain JSON numbers in its own unit (won,
//! dollars, ...). `Money` reads any finite number, rounding past the fourth
//! decimal half away from zero, and writes whole amounts back as integers.
//!
//! ## Usage
//! ```rust
//! use legacyframe_core::money::Money;
//!
//! let price = Money::from_f64(10.99).unwrap();
//! let line = price * 3;
//! assert_eq!(line, Money::from_f64(32.97).unwrap());
//! assert_eq!(serde_json::to_string(&line).unwrap(), "32.97");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Fractional digits every amount is kept to.
pub const MONEY_DECIMALS: u8 = 4;

/// Scaled units per whole price unit.
const SCALE: i64 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value, fixed-point with [`MONEY_DECIMALS`] fractional digits.
///
/// Serializes as a bare JSON number, which is the `price` field of the
/// persisted snapshot. Arithmetic saturates at the `i64` bounds instead of
/// panicking; a corrupt quantity must not bring the page down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole price units.
    ///
    /// ```rust
    /// use legacyframe_core::money::Money;
    ///
    /// assert_eq!(Money::new(20000).to_string(), "$20000.00");
    /// ```
    #[inline]
    pub const fn new(units: i64) -> Self {
        Money(units.saturating_mul(SCALE))
    }

    /// Creates a Money value from ten-thousandths of a price unit.
    #[inline]
    pub const fn from_scaled(scaled: i64) -> Self {
        Money(scaled)
    }

    /// Converts a JSON-style number, rounding to [`MONEY_DECIMALS`] places.
    ///
    /// Returns `None` for NaN and infinities. Values beyond the
    /// representable range saturate.
    ///
    /// ```rust
    /// use legacyframe_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(19.99), Some(Money::from_scaled(199_900)));
    /// assert_eq!(Money::from_f64(0.00005), Some(Money::from_scaled(1)));
    /// assert_eq!(Money::from_f64(f64::NAN), None);
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // `as` saturates for out-of-range floats.
        Some(Money((value * SCALE as f64).round() as i64))
    }

    /// Converts a parsed JSON number. Integers are taken exactly.
    pub fn from_json_number(number: &serde_json::Number) -> Option<Self> {
        match number.as_i64() {
            Some(units) => Some(Money::new(units)),
            None => number.as_f64().and_then(Money::from_f64),
        }
    }

    /// Returns the value in ten-thousandths of a price unit.
    #[inline]
    pub const fn scaled(&self) -> i64 {
        self.0
    }

    /// Returns the value as a float, for display and JSON output.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether the value has no fractional part.
    #[inline]
    pub const fn is_whole(&self) -> bool {
        self.0 % SCALE == 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```rust
    /// use legacyframe_core::money::Money;
    ///
    /// let unit = Money::new(1000);
    /// assert_eq!(unit.times_quantity(3), Money::new(3000));
    /// ```
    #[inline]
    pub const fn times_quantity(&self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(quantity as i64))
    }

    /// Formats the amount with a currency symbol and a fixed number of
    /// decimal places, rounding half away from zero.
    ///
    /// ```rust
    /// use legacyframe_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(12.34).unwrap().format("$", 2), "$12.34");
    /// assert_eq!(Money::new(20000).format("₩", 0), "₩20000");
    /// assert_eq!(Money::from_f64(-0.05).unwrap().format("$", 2), "-$0.05");
    /// assert_eq!(Money::from_scaled(199_950).format("$", 2), "$20.00");
    /// ```
    pub fn format(&self, symbol: &str, decimals: u8) -> String {
        let abs = self.0.unsigned_abs();

        let (rounded, shown) = if decimals >= MONEY_DECIMALS {
            (abs, MONEY_DECIMALS)
        } else {
            let divisor = 10_u64.pow(u32::from(MONEY_DECIMALS - decimals));
            (abs.saturating_add(divisor / 2) / divisor, decimals)
        };

        let sign = if self.0 < 0 && rounded != 0 { "-" } else { "" };
        let unit = 10_u64.pow(u32::from(shown));
        let whole = rounded / unit;

        if decimals == 0 {
            return format!("{sign}{symbol}{whole}");
        }

        let mut fraction = format!("{:0width$}", rounded % unit, width = usize::from(shown));
        for _ in shown..decimals {
            fraction.push('0');
        }
        format!("{sign}{symbol}{whole}.{fraction}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses two decimal places and a `$` sign.
///
/// This is for logs and debugging. Page components format through the
/// store's configured currency instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format("$", 2))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 / SCALE)
        } else {
            serializer.serialize_f64(self.to_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        Money::from_json_number(&number)
            .ok_or_else(|| serde::de::Error::custom(format!("not a finite amount: {number}")))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: u32) -> Self {
        self.times_quantity(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn money(value: f64) -> Money {
        Money::from_f64(value).unwrap()
    }

    #[test]
    fn test_new_and_accessors() {
        let amount = Money::new(1099);
        assert_eq!(amount.scaled(), 10_990_000);
        assert!(amount.is_whole());
        assert!(!amount.is_zero());
        assert!(!amount.is_negative());
        assert!(Money::zero().is_zero());
        assert!(Money::new(-1).is_negative());
        assert!(!money(0.5).is_whole());
    }

    #[test]
    fn test_from_f64_rounds_to_four_places() {
        assert_eq!(money(19.99).scaled(), 199_900);
        assert_eq!(money(0.1).scaled(), 1_000);
        assert_eq!(money(1.23456).scaled(), 12_346);
        assert_eq!(money(-1.23456).scaled(), -12_346);
        assert_eq!(Money::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_from_f64_saturates() {
        assert_eq!(money(1e300).scaled(), i64::MAX);
        assert_eq!(money(-1e300).scaled(), i64::MIN);
    }

    #[test]
    fn test_float_sums_are_exact() {
        assert_eq!(money(0.1) + money(0.2), money(0.3));
        assert_eq!(money(19.99) * 3, money(59.97));
    }

    #[test]
    fn test_display() {
        assert_eq!(money(10.99).to_string(), "$10.99");
        assert_eq!(Money::new(5).to_string(), "$5.00");
        assert_eq!(money(-5.5).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(Money::new(400).format("$", 2), "$400.00");
        assert_eq!(Money::new(40000).format("", 0), "40000");
        assert_eq!(money(0.001).format("€", 3), "€0.001");
        assert_eq!(money(1.5).format("", 6), "1.500000");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(money(2.5).format("₩", 0), "₩3");
        assert_eq!(money(-2.5).format("₩", 0), "-₩3");
        assert_eq!(money(0.004).format("$", 2), "$0.00");
        assert_eq!(money(-0.004).format("$", 2), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);

        assert_eq!(a + b, Money::new(1500));
        assert_eq!(a * 3, Money::new(3000));

        let mut c = a;
        c += b;
        assert_eq!(c, Money::new(1500));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::new(100), Money::new(250), Money::zero()]
            .into_iter()
            .sum();
        assert_eq!(total, Money::new(350));

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_saturating_arithmetic() {
        let huge = Money::from_scaled(i64::MAX - 1);
        assert_eq!((huge + Money::new(10)).scaled(), i64::MAX);
        assert_eq!(huge.times_quantity(u32::MAX).scaled(), i64::MAX);
        assert_eq!(Money::new(i64::MAX).scaled(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Money::new(20000)).unwrap(), "20000");
        assert_eq!(serde_json::to_string(&money(19.99)).unwrap(), "19.99");

        let parsed: Money = serde_json::from_str("1000").unwrap();
        assert_eq!(parsed, Money::new(1000));
        let parsed: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(parsed, money(19.99));
        assert!(serde_json::from_str::<Money>("\"5\"").is_err());
    }

    #[test]
    fn test_json_roundtrip_of_extremes() {
        for amount in [Money::from_scaled(i64::MAX), Money::from_scaled(1), money(-0.5)] {
            let json = serde_json::to_string(&amount).unwrap();
            let back: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(back, amount, "via {json}");
        }
    }
}

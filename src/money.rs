//! Money type for ledger arithmetic and API boundary enforcement
//!
//! - `Amount`: integer minor-unit value with checked arithmetic
//! - Decimal parsing/formatting happens only at the boundary; the core
//!   never computes in floating point.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core_types::MinorUnits;

/// Decimal places of the ledger currency (minor units per major unit = 10^SCALE).
pub const SCALE: u32 = 2;

/// Errors converting boundary decimals into ledger amounts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount has more than {SCALE} decimal places: {got}")]
    TooManyDecimals { got: String },

    #[error("amount out of range: {got}")]
    OutOfRange { got: String },

    #[error("invalid amount: {got}")]
    Unparseable { got: String },
}

/// Monetary amount in minor units.
///
/// # Invariants (enforced by the private field):
/// - Constructed only from exact decimal values (no silent rounding)
/// - All arithmetic is checked; overflow is an explicit error
///
/// The sign is NOT restricted here; positivity of expense amounts is a
/// validation concern, and net balances are legitimately negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(MinorUnits);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Wrap a raw minor-unit value.
    pub const fn from_minor(minor: MinorUnits) -> Self {
        Self(minor)
    }

    /// Raw minor-unit value (read-only).
    #[inline(always)]
    pub const fn minor(&self) -> MinorUnits {
        self.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Convert a boundary decimal into minor units.
    ///
    /// # Errors
    /// - `TooManyDecimals` if the value is finer than the ledger scale
    ///   (no silent rounding of user input)
    /// - `OutOfRange` on overflow
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        let normalized = value.normalize();
        if normalized.scale() > SCALE {
            return Err(MoneyError::TooManyDecimals {
                got: value.to_string(),
            });
        }
        let scaled = normalized
            .checked_mul(Decimal::from(10i64.pow(SCALE)))
            .ok_or_else(|| MoneyError::OutOfRange {
                got: value.to_string(),
            })?;
        let minor = scaled.to_i64().ok_or_else(|| MoneyError::OutOfRange {
            got: value.to_string(),
        })?;
        Ok(Self(minor))
    }

    /// Decimal view for display and serialization.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }

    pub fn checked_add(&self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(&self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always render with full ledger scale: 30.00, not 30.
        write!(f, "{}", self.to_decimal().round_dp(SCALE))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        // Only accept JSON strings for strict format control
        let s = String::deserialize(deserializer)?;
        let d = Decimal::from_str(&s).map_err(|e| D::Error::custom(format!("invalid amount: {e}")))?;
        Amount::from_decimal(d).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_whole() {
        let a = Amount::from_decimal(Decimal::from(30)).unwrap();
        assert_eq!(a.minor(), 3000);
        assert_eq!(a.to_string(), "30.00");
    }

    #[test]
    fn test_from_decimal_cents() {
        let a = Amount::from_decimal(Decimal::from_str("19.99").unwrap()).unwrap();
        assert_eq!(a.minor(), 1999);
    }

    #[test]
    fn test_from_decimal_trailing_zeros_ok() {
        // 12.500 normalizes to 12.5, which fits the ledger scale
        let a = Amount::from_decimal(Decimal::from_str("12.500").unwrap()).unwrap();
        assert_eq!(a.minor(), 1250);
    }

    #[test]
    fn test_from_decimal_rejects_sub_cent() {
        let err = Amount::from_decimal(Decimal::from_str("0.005").unwrap()).unwrap_err();
        assert!(matches!(err, MoneyError::TooManyDecimals { .. }));
    }

    #[test]
    fn test_negative_allowed_at_type_level() {
        // Sign policy belongs to expense validation, not the Amount type.
        let a = Amount::from_decimal(Decimal::from_str("-5").unwrap()).unwrap();
        assert_eq!(a.minor(), -500);
        assert!(!a.is_positive());
    }

    #[test]
    fn test_serde_string_round_trip() {
        let a = Amount::from_minor(1234);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#""12.34""#);
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_deserialize_rejects_json_number() {
        let result: Result<Amount, _> = serde_json::from_str("12.34");
        assert!(result.is_err());
    }

    #[test]
    fn test_checked_add_overflow() {
        let a = Amount::from_minor(i64::MAX);
        assert!(a.checked_add(Amount::from_minor(1)).is_none());
    }
}

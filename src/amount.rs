//! The fixed-point `Amount` value type.
//!
//! An amount is a currency code plus a whole-unit `value` and a `fraction`
//! counted in units of `1 / FRACTIONAL_BASE`. All arithmetic is done on the
//! two integers, never through floating point.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Number of decimal digits the fraction can hold.
pub const FRACTIONAL_LENGTH: usize = 8;

/// Scale of the fractional part: `10^FRACTIONAL_LENGTH`.
pub const FRACTIONAL_BASE: u64 = 100_000_000;

/// Exclusive upper bound of `value`, `2^52`, so values stay exact as JSON numbers.
pub const MAX_AMOUNT_VALUE: u64 = 1 << 52;

/// A monetary amount in a single currency.
///
/// # Invariants
///
/// - `fraction < FRACTIONAL_BASE`
/// - `value < MAX_AMOUNT_VALUE`
/// - `currency` is non-empty
///
/// Amounts are immutable; arithmetic returns new values. The derived ordering
/// compares currency, then value, then fraction.
///
/// # Examples
///
/// ```
/// use taler_amount::Amount;
///
/// let amount: Amount = "EUR:1.5".parse().unwrap();
/// assert_eq!(amount.value(), 1);
/// assert_eq!(amount.fraction(), 50_000_000);
/// assert_eq!(amount.to_string(), "EUR:1.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    currency: String,
    value: u64,
    fraction: u64,
}

impl Amount {
    /// Creates an amount from its parts without normalizing.
    ///
    /// The caller is responsible for the invariants; an out-of-range fraction
    /// is stored as given.
    pub fn new(currency: impl Into<String>, value: u64, fraction: u64) -> Self {
        Amount {
            currency: currency.into(),
            value,
            fraction,
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: impl Into<String>) -> Self {
        Amount::new(currency, 0, 0)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn fraction(&self) -> u64 {
        self.fraction
    }

    /// Returns `true` if both value and fraction are zero.
    pub fn is_zero(&self) -> bool {
        self.value == 0 && self.fraction == 0
    }

    /// Verifies the representation invariants.
    pub fn check_invariant(&self) -> bool {
        !self.currency.is_empty()
            && self.value < MAX_AMOUNT_VALUE
            && self.fraction < FRACTIONAL_BASE
    }
}

impl FromStr for Amount {
    type Err = crate::error::AmountError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        crate::parse::parse_amount(s)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

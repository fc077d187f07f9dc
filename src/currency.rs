//! Currency display specifications and the registry that maps codes to them.
//!
//! The registry is an ordinary value: build it once, then share it by
//! reference (or behind an `Arc`) with whatever formats amounts. Replacing
//! the specifications means building a new registry, never editing one
//! that readers hold.

use crate::amount::Amount;
use crate::error::{AmountError, RegistryError};
use crate::format::format_with_specification;
use crate::parse::is_valid_currency;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;

/// Upper bound on any digit count a specification may carry.
pub const MAX_DISPLAY_DIGITS: u32 = 16;

/// How a currency is presented to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySpecification {
    /// Human-readable name, e.g. "Japanese Yen".
    pub name: String,

    /// Digits a user may enter after the decimal separator.
    #[serde(default)]
    pub num_fractional_input_digits: u32,

    /// Digits normally shown after the decimal separator (2 for €, 0 for ¥).
    pub num_fractional_normal_digits: u32,

    /// Digits shown even when they are trailing zeros.
    #[serde(default)]
    pub num_fractional_trailing_zero_digits: u32,

    /// Unit names by power of ten; `0` is the base symbol, e.g. `-3 => "mBTC"`.
    pub alt_unit_names: BTreeMap<i32, String>,
}

impl CurrencySpecification {
    /// Creates a specification whose input and trailing-zero digits equal
    /// `normal_digits`, with `base_unit` as the power-0 unit name.
    pub fn new(name: impl Into<String>, normal_digits: u32, base_unit: impl Into<String>) -> Self {
        let mut alt_unit_names = BTreeMap::new();
        alt_unit_names.insert(0, base_unit.into());
        CurrencySpecification {
            name: name.into(),
            num_fractional_input_digits: normal_digits,
            num_fractional_normal_digits: normal_digits,
            num_fractional_trailing_zero_digits: normal_digits,
            alt_unit_names,
        }
    }

    /// Overrides the number of digits a user may enter.
    pub fn with_input_digits(mut self, digits: u32) -> Self {
        self.num_fractional_input_digits = digits;
        self
    }

    /// Adds a unit name for a power of ten, e.g. `(-3, "mBTC")`.
    pub fn with_unit_name(mut self, power: i32, name: impl Into<String>) -> Self {
        self.alt_unit_names.insert(power, name.into());
        self
    }

    /// Unit name registered for `power`, if any.
    pub fn unit_name(&self, power: i32) -> Option<&str> {
        self.alt_unit_names.get(&power).map(String::as_str)
    }

    fn validate(&self, code: &str) -> Result<(), RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidSpecification {
            code: code.to_string(),
            reason: reason.to_string(),
        };

        if !is_valid_currency(code) {
            return Err(invalid("currency code must match [A-Za-z0-9_*-]+"));
        }
        for (field, digits) in [
            ("num_fractional_input_digits", self.num_fractional_input_digits),
            ("num_fractional_normal_digits", self.num_fractional_normal_digits),
            ("num_fractional_trailing_zero_digits", self.num_fractional_trailing_zero_digits),
        ] {
            if digits > MAX_DISPLAY_DIGITS {
                return Err(invalid(&format!(
                    "{} is {}, at most {} are supported",
                    field, digits, MAX_DISPLAY_DIGITS
                )));
            }
        }
        match self.unit_name(0) {
            Some(name) if !name.is_empty() => Ok(()),
            _ => Err(invalid("missing unit name for power 0")),
        }
    }
}

/// Immutable mapping from currency code to [`CurrencySpecification`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyRegistry {
    specs: HashMap<String, CurrencySpecification>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        CurrencyRegistry {
            specs: HashMap::new(),
        }
    }

    /// Registry with the currencies a merchant ships by default.
    pub fn with_defaults() -> Self {
        CurrencyRegistry::new()
            .insert("KUDOS", CurrencySpecification::new("KUDOS", 2, "KUDOS"))
            .insert("USD", CurrencySpecification::new("US Dollar", 2, "$"))
            .insert("EUR", CurrencySpecification::new("Euro", 2, "€"))
            .insert(
                "JPY",
                CurrencySpecification::new("Japanese Yen", 0, "¥").with_input_digits(2),
            )
    }

    /// Adds or replaces the specification for `code` while building.
    pub fn insert(mut self, code: impl Into<String>, spec: CurrencySpecification) -> Self {
        self.specs.insert(code.into(), spec);
        self
    }

    /// Loads a registry from JSON.
    ///
    /// Accepts either a bare object of `code -> specification`, or a
    /// merchant configuration object whose `currencies` field holds one.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    /// Like [`CurrencyRegistry::from_json_str`], reading from `reader`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        Self::from_json_value(serde_json::from_reader(reader)?)
    }

    fn from_json_value(mut document: serde_json::Value) -> Result<Self, RegistryError> {
        let entries = match document.get_mut("currencies").map(serde_json::Value::take) {
            Some(currencies) => currencies,
            None => document,
        };
        let specs: HashMap<String, CurrencySpecification> = serde_json::from_value(entries)?;

        for (code, spec) in &specs {
            spec.validate(code)?;
            debug!(
                "Loaded currency {} ({}), {} normal digits",
                code, spec.name, spec.num_fractional_normal_digits
            );
        }

        Ok(CurrencyRegistry { specs })
    }

    /// Looks up the specification for `code` by exact match.
    pub fn get(&self, code: &str) -> Option<&CurrencySpecification> {
        self.specs.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.specs.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Registered codes in ascending order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Formats `amount` with the specification of its currency.
    ///
    /// # Errors
    ///
    /// [`AmountError::UnknownCurrency`] if the currency is not registered.
    pub fn format(&self, amount: &Amount) -> Result<String, AmountError> {
        let spec = self
            .get(amount.currency())
            .ok_or_else(|| AmountError::UnknownCurrency(amount.currency().to_string()))?;
        Ok(format_with_specification(amount, spec))
    }
}

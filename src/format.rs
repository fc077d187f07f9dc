//! Canonical and display rendering of amounts.

use crate::amount::{Amount, FRACTIONAL_LENGTH};
use crate::currency::{CurrencyRegistry, CurrencySpecification, MAX_DISPLAY_DIGITS};
use crate::error::AmountError;
use std::fmt;

/// Canonical wire form: `<currency>:<value>[.<fraction>]`.
///
/// The fraction is written as 8 zero-padded digits with trailing zeros
/// removed, and left out entirely when zero. Lossless; parses back to the
/// same amount.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.currency(), self.value())?;
        if self.fraction() != 0 {
            let digits = format!("{:0width$}", self.fraction(), width = FRACTIONAL_LENGTH);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

/// Renders `amount` for humans according to `spec`.
///
/// The fraction is truncated, not rounded, to `num_fractional_normal_digits`.
/// The base unit name (power 0) prefixes the number; the currency code is
/// used when the specification has none.
///
/// ```
/// use taler_amount::{format_with_specification, Amount, CurrencySpecification};
///
/// let spec = CurrencySpecification::new("KUDOS", 2, "K");
/// let amount: Amount = "KUDOS:50.234".parse().unwrap();
/// assert_eq!(format_with_specification(&amount, &spec), "K 50.23");
/// ```
pub fn format_with_specification(amount: &Amount, spec: &CurrencySpecification) -> String {
    let unit = spec.unit_name(0).unwrap_or_else(|| amount.currency());
    let width = spec.num_fractional_normal_digits.min(MAX_DISPLAY_DIGITS) as usize;

    if width == 0 {
        return format!("{} {}", unit, amount.value());
    }

    let digits = if width <= FRACTIONAL_LENGTH {
        let divisor = 10u64.pow((FRACTIONAL_LENGTH - width) as u32);
        format!("{:0width$}", amount.fraction() / divisor, width = width)
    } else {
        // Finer than the base: pad the exact digits on the right
        let exact = format!("{:0width$}", amount.fraction(), width = FRACTIONAL_LENGTH);
        format!("{:0<width$}", exact, width = width)
    };

    format!("{} {}.{}", unit, amount.value(), digits)
}

impl Amount {
    /// See [`format_with_specification`].
    pub fn format_with_specification(&self, spec: &CurrencySpecification) -> String {
        format_with_specification(self, spec)
    }

    /// Formats using the specification registered for this amount's currency.
    pub fn format(&self, registry: &CurrencyRegistry) -> Result<String, AmountError> {
        registry.format(self)
    }
}

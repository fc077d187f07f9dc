//! Lossless conversion between [`Amount`] and `rust_decimal::Decimal`.
//!
//! Amounts fit a `Decimal` exactly: at most 52 bits of value and 8 digits of
//! scale stay far inside its 96-bit mantissa.

use crate::amount::{Amount, FRACTIONAL_BASE, FRACTIONAL_LENGTH, MAX_AMOUNT_VALUE};
use crate::error::AmountError;
use rust_decimal::Decimal;

impl Amount {
    /// Returns the numeric part of the amount as a normalized `Decimal`.
    ///
    /// ```
    /// use taler_amount::Amount;
    ///
    /// let amount: Amount = "EUR:25.20007".parse().unwrap();
    /// assert_eq!(amount.to_decimal().to_string(), "25.20007");
    /// ```
    pub fn to_decimal(&self) -> Decimal {
        let units =
            i128::from(self.value()) * i128::from(FRACTIONAL_BASE) + i128::from(self.fraction());
        Decimal::from_i128_with_scale(units, FRACTIONAL_LENGTH as u32).normalize()
    }

    /// Builds an amount in `currency` from a `Decimal`.
    ///
    /// # Errors
    ///
    /// - [`AmountError::AmountUnderflow`] for negative numbers
    /// - [`AmountError::PrecisionExceeded`] for more than 8 significant fractional digits
    /// - [`AmountError::ValueOutOfRange`] when the whole part is `>= 2^52`
    pub fn from_decimal(
        currency: impl Into<String>,
        decimal: Decimal,
    ) -> Result<Amount, AmountError> {
        let currency = currency.into();
        let normalized = decimal.normalize();

        if normalized.is_sign_negative() && !normalized.is_zero() {
            return Err(AmountError::AmountUnderflow {
                minuend: format!("{}:0", currency),
                subtrahend: format!("{}:{}", currency, normalized.abs()),
            });
        }

        let scale = normalized.scale();
        if scale as usize > FRACTIONAL_LENGTH {
            return Err(AmountError::PrecisionExceeded {
                input: normalized.to_string(),
                digits: scale as usize,
            });
        }

        let units = normalized.mantissa().unsigned_abs()
            * 10u128.pow(FRACTIONAL_LENGTH as u32 - scale);
        let base = u128::from(FRACTIONAL_BASE);
        let value = units / base;
        if value >= u128::from(MAX_AMOUNT_VALUE) {
            return Err(AmountError::ValueOutOfRange(normalized.trunc().to_string()));
        }

        // Both parts were bounds-checked above
        Ok(Amount::new(currency, value as u64, (units % base) as u64))
    }
}

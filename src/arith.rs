//! Checked arithmetic and comparison over amounts of one currency.

use crate::amount::{Amount, FRACTIONAL_BASE, MAX_AMOUNT_VALUE};
use crate::error::AmountError;
use std::cmp::Ordering;

impl Amount {
    /// Adds `other` to `self`, carrying fraction overflow into the value.
    ///
    /// # Errors
    ///
    /// - [`AmountError::CurrencyMismatch`] if the currencies differ
    /// - [`AmountError::AmountOverflow`] if the resulting value reaches `2^52`
    ///
    /// # Examples
    ///
    /// ```
    /// use taler_amount::Amount;
    ///
    /// let a: Amount = "EUR:1.5".parse().unwrap();
    /// let b: Amount = "EUR:23.70007".parse().unwrap();
    /// assert_eq!(a.checked_add(&b).unwrap().to_string(), "EUR:25.20007");
    /// ```
    pub fn checked_add(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.ensure_same_currency(other)?;

        let mut fraction = self.fraction() + other.fraction();
        let mut carry = 0;
        if fraction >= FRACTIONAL_BASE {
            carry = 1;
            fraction -= FRACTIONAL_BASE;
        }

        let value = self
            .value()
            .checked_add(other.value())
            .and_then(|v| v.checked_add(carry))
            .filter(|v| *v < MAX_AMOUNT_VALUE)
            .ok_or_else(|| AmountError::AmountOverflow {
                currency: self.currency().to_string(),
                value: self.value().saturating_add(other.value()).saturating_add(carry),
            })?;

        Ok(Amount::new(self.currency(), value, fraction))
    }

    /// Subtracts `other` from `self`, borrowing one unit when the fraction is short.
    ///
    /// # Errors
    ///
    /// - [`AmountError::CurrencyMismatch`] if the currencies differ
    /// - [`AmountError::AmountUnderflow`] if `other > self`
    pub fn checked_sub(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.ensure_same_currency(other)?;

        let underflow = || AmountError::AmountUnderflow {
            minuend: self.to_string(),
            subtrahend: other.to_string(),
        };

        let mut value = self.value();
        let mut fraction = self.fraction();
        if fraction < other.fraction() {
            value = value.checked_sub(1).ok_or_else(underflow)?;
            fraction += FRACTIONAL_BASE;
        }
        let value = value.checked_sub(other.value()).ok_or_else(underflow)?;

        Ok(Amount::new(self.currency(), value, fraction - other.fraction()))
    }

    /// Compares magnitudes of two amounts in the same currency.
    ///
    /// Unlike `Ord`, which orders by currency code first, this refuses to
    /// compare across currencies.
    pub fn compare(&self, other: &Amount) -> Result<Ordering, AmountError> {
        self.ensure_same_currency(other)?;
        Ok((self.value(), self.fraction()).cmp(&(other.value(), other.fraction())))
    }

    /// Sums `amounts` starting from zero in `currency`.
    pub fn checked_sum<'a, I>(currency: &str, amounts: I) -> Result<Amount, AmountError>
    where
        I: IntoIterator<Item = &'a Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::zero(currency), |acc, amount| acc.checked_add(amount))
    }

    fn ensure_same_currency(&self, other: &Amount) -> Result<(), AmountError> {
        if self.currency() != other.currency() {
            return Err(AmountError::CurrencyMismatch {
                left: self.currency().to_string(),
                right: other.currency().to_string(),
            });
        }
        Ok(())
    }
}

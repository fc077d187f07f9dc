//! Per-account balance in a single currency.
//!
//! A balance never goes negative: debits that would underflow are refused
//! and leave the balance untouched.

use crate::amount::Amount;
use crate::error::AmountError;

/// Running balance of one account in one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// Account identifier.
    pub account: String,

    /// Current amount; its currency is fixed at creation.
    amount: Amount,
}

impl Balance {
    /// Creates a zero balance for `account` in `currency`.
    pub fn new(account: impl Into<String>, currency: &str) -> Self {
        Balance {
            account: account.into(),
            amount: Amount::zero(currency),
        }
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn currency(&self) -> &str {
        self.amount.currency()
    }

    /// Adds `amount`. On overflow the balance is unchanged.
    pub fn credit(&mut self, amount: &Amount) -> Result<(), AmountError> {
        self.amount = self.amount.checked_add(amount)?;
        Ok(())
    }

    /// Subtracts `amount`. On underflow the balance is unchanged.
    pub fn debit(&mut self, amount: &Amount) -> Result<(), AmountError> {
        self.amount = self.amount.checked_sub(amount)?;
        Ok(())
    }
}

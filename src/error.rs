//! Error types for amounts, the currency registry and the ledger.

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors produced by parsing, arithmetic and formatting of amounts.
///
/// None of these are fatal; callers decide how to surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Input does not match `<currency>:<integer>[.<digits>]`
    #[error("malformed amount: {0:?}")]
    MalformedAmount(String),

    /// More fractional digits than the fixed base supports
    #[error("fraction of {input:?} has {digits} digits, at most 8 are supported")]
    PrecisionExceeded { input: String, digits: usize },

    /// Integer part unparsable or outside the representable range
    #[error("value {0} is out of range")]
    ValueOutOfRange(String),

    /// Arithmetic or comparison across two currencies
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// Sum would reach or exceed the maximum amount value
    #[error("amount overflow in {currency}: value {value} reaches or exceeds the maximum")]
    AmountOverflow { currency: String, value: u64 },

    /// Difference would be negative
    #[error("amount underflow: {minuend} - {subtrahend} is negative")]
    AmountUnderflow {
        minuend: String,
        subtrahend: String,
    },

    /// No currency specification registered for the code
    #[error("no currency specification found for {0}")]
    UnknownCurrency(String),
}

/// Errors raised while loading a currency registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry document is not valid JSON for the expected shape
    #[error("invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A currency entry failed validation
    #[error("invalid specification for {code}: {reason}")]
    InvalidSpecification { code: String, reason: String },
}

/// Errors that can occur while running the ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Currency registry could not be loaded
    #[error("Currency registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: taler-amount <ledger.csv> [currencies.json]")]
    MissingArgument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_error_messages() {
        let err = AmountError::CurrencyMismatch {
            left: "EUR".to_string(),
            right: "USD".to_string(),
        };
        assert_eq!(err.to_string(), "currency mismatch: EUR vs USD");

        let err = AmountError::UnknownCurrency("FOO".to_string());
        assert_eq!(err.to_string(), "no currency specification found for FOO");

        let err = AmountError::AmountOverflow {
            currency: "EUR".to_string(),
            value: 1 << 52,
        };
        assert_eq!(
            err.to_string(),
            "amount overflow in EUR: value 4503599627370496 reaches or exceeds the maximum"
        );
    }

    #[test]
    fn test_registry_error_converts_to_ledger_error() {
        let err = RegistryError::InvalidSpecification {
            code: "EUR".to_string(),
            reason: "missing unit name for power 0".to_string(),
        };
        let ledger_err: LedgerError = err.into();
        assert!(matches!(ledger_err, LedgerError::Registry(_)));
        assert!(ledger_err.to_string().contains("EUR"));
    }
}

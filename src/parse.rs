//! Tokenizer for the canonical amount grammar.
//!
//! ```text
//! amount   = currency ":" integer [ "." digits ]
//! currency = 1*( ALPHA / DIGIT / "_" / "*" / "-" )
//! integer  = 1*DIGIT
//! digits   = 1*8DIGIT
//! ```
//!
//! ASCII whitespace around the whole string is ignored.

use crate::amount::{Amount, FRACTIONAL_BASE, FRACTIONAL_LENGTH, MAX_AMOUNT_VALUE};
use crate::error::AmountError;

/// Parses `<currency>:<integer>[.<digits>]` into an [`Amount`].
///
/// # Errors
///
/// - [`AmountError::MalformedAmount`] when the input does not match the grammar
/// - [`AmountError::PrecisionExceeded`] for more than 8 fractional digits
/// - [`AmountError::ValueOutOfRange`] when the integer part is `>= 2^52`
pub fn parse_amount(input: &str) -> Result<Amount, AmountError> {
    let malformed = || AmountError::MalformedAmount(input.to_string());
    let trimmed = input.trim_matches(|c: char| c.is_ascii_whitespace());

    let (currency, number) = trimmed.split_once(':').ok_or_else(malformed)?;
    if !is_valid_currency(currency) {
        return Err(malformed());
    }

    let (integer, digits) = match number.split_once('.') {
        Some((integer, digits)) => (integer, Some(digits)),
        None => (number, None),
    };
    if !is_digits(integer) || !digits.map_or(true, is_digits) {
        return Err(malformed());
    }

    let fraction = match digits {
        Some(digits) => parse_fraction(input, digits)?,
        None => 0,
    };
    let value = parse_value(integer)?;

    Ok(Amount::new(currency, value, fraction))
}

/// Returns `true` if `code` matches `[A-Za-z0-9_*-]+`.
pub fn is_valid_currency(code: &str) -> bool {
    !code.is_empty()
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'*' | b'-'))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_value(integer: &str) -> Result<u64, AmountError> {
    let out_of_range = || AmountError::ValueOutOfRange(integer.to_string());
    let value: u64 = integer.parse().map_err(|_| out_of_range())?;
    if value >= MAX_AMOUNT_VALUE {
        return Err(out_of_range());
    }
    Ok(value)
}

/// Scales fractional digits to units of `1 / FRACTIONAL_BASE`, e.g. `"5"` to `50_000_000`.
fn parse_fraction(input: &str, digits: &str) -> Result<u64, AmountError> {
    if digits.len() > FRACTIONAL_LENGTH {
        return Err(AmountError::PrecisionExceeded {
            input: input.to_string(),
            digits: digits.len(),
        });
    }

    let mut fraction = 0u64;
    let mut scale = FRACTIONAL_BASE;
    for b in digits.bytes() {
        scale /= 10;
        fraction += u64::from(b - b'0') * scale;
    }
    Ok(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Amount {
        parse_amount(s).unwrap()
    }

    #[test]
    fn test_parse_integer_only() {
        let a = parse("EUR:50");
        assert_eq!(a, Amount::new("EUR", 50, 0));
    }

    #[test]
    fn test_parse_fraction_is_right_padded() {
        assert_eq!(parse("EUR:1.5").fraction(), 50_000_000);
        assert_eq!(parse("EUR:23.70007000").fraction(), 70_007_000);
        assert_eq!(parse("EUR:0.00000001").fraction(), 1);
        assert_eq!(parse("EUR:0.005").fraction(), 500_000);
        assert_eq!(parse("EUR:1.0").fraction(), 0);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert_eq!(parse("  KUDOS:50.2  "), parse("KUDOS:50.2"));
        assert_eq!(parse("\tKUDOS:50.2\r\n"), parse("KUDOS:50.2"));
    }

    #[test]
    fn test_parse_rejects_inner_whitespace() {
        for input in ["EUR: 1", "EUR :1", "EUR:1 .5", "EUR:1. 5", "E UR:1"] {
            assert!(
                matches!(parse_amount(input), Err(AmountError::MalformedAmount(_))),
                "expected malformed: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_currency_character_class() {
        let a = parse("test_coin*-9:3");
        assert_eq!(a.currency(), "test_coin*-9");

        assert!(matches!(
            parse_amount("EU$:1"),
            Err(AmountError::MalformedAmount(_))
        ));
        assert!(matches!(
            parse_amount("ÉUR:1"),
            Err(AmountError::MalformedAmount(_))
        ));
    }

    #[test]
    fn test_parse_currency_is_case_sensitive() {
        assert_ne!(parse("eur:1"), parse("EUR:1"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "", "EUR", "EUR:", ":1", "EUR:1.", "EUR:.5", "EUR:1.2.3", "EUR:1:2", "EUR:-1",
            "EUR:+1", "EUR;1", "EUR:1e3", "EUR:١",
        ] {
            assert!(
                matches!(parse_amount(input), Err(AmountError::MalformedAmount(_))),
                "expected malformed: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_precision_exceeded() {
        let err = parse_amount("EUR:1.123456789").unwrap_err();
        assert_eq!(
            err,
            AmountError::PrecisionExceeded {
                input: "EUR:1.123456789".to_string(),
                digits: 9,
            }
        );

        // Eight digits is the limit, trailing zeros included
        assert!(parse_amount("EUR:1.12345678").is_ok());
        assert!(parse_amount("EUR:1.000000000").is_err());
    }

    #[test]
    fn test_parse_value_out_of_range() {
        assert!(matches!(
            parse_amount("EUR:18446744073709551616"),
            Err(AmountError::ValueOutOfRange(_))
        ));
        assert!(matches!(
            parse_amount("EUR:4503599627370496"),
            Err(AmountError::ValueOutOfRange(_))
        ));

        let max = parse("EUR:4503599627370495.99999999");
        assert_eq!(max.value(), MAX_AMOUNT_VALUE - 1);
        assert_eq!(max.fraction(), FRACTIONAL_BASE - 1);
    }

    #[test]
    fn test_parse_leading_zeros_in_value() {
        assert_eq!(parse("EUR:007.5"), Amount::new("EUR", 7, 50_000_000));
    }

    #[test]
    fn test_is_valid_currency() {
        assert!(is_valid_currency("KUDOS"));
        assert!(is_valid_currency("a-b_c*1"));
        assert!(!is_valid_currency(""));
        assert!(!is_valid_currency("EUR "));
    }
}

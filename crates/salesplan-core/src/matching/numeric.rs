//! Numeric token detection.
//!
//! A token counts as a value when it starts with a number, the way a
//! hand-written figure such as "120" or "45,5" or "300р" reads on a
//! scanned plan.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    // sign, integer part, fraction after integer, bare fraction, exponent
    static ref LEADING_NUMBER: Regex = Regex::new(
        r"^([+-])?(?:(\d+)(?:[.,](\d*))?|[.,](\d+))(?:[eE]([+-]?\d+))?"
    ).unwrap();
}

/// Parse the longest numeric prefix of a trimmed token.
///
/// Returns `None` when the token does not start with a number, or when the
/// number does not fit a `Decimal` (e.g. "1e100"). Use [`is_numeric`] to
/// tell values from labels.
pub fn leading_number(text: &str) -> Option<Decimal> {
    let caps = LEADING_NUMBER.captures(text.trim())?;

    let sign = caps.get(1).map_or("", |m| m.as_str());
    let integer = caps.get(2).map_or("0", |m| m.as_str());
    let fraction = caps
        .get(3)
        .or_else(|| caps.get(4))
        .map_or("", |m| m.as_str());

    let mut number = format!("{}{}", sign, integer);
    if !fraction.is_empty() {
        number.push('.');
        number.push_str(fraction);
    }

    match caps.get(5) {
        Some(exponent) => Decimal::from_scientific(&format!("{}e{}", number, exponent.as_str())).ok(),
        None => Decimal::from_str(&number).ok(),
    }
}

/// Whether a token is a value rather than a label, regardless of whether
/// its magnitude can be represented.
pub fn is_numeric(text: &str) -> bool {
    LEADING_NUMBER.is_match(text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(leading_number("123.5"), Some(dec("123.5")));
        assert_eq!(leading_number(" 42 "), Some(dec("42")));
        assert_eq!(leading_number("-7"), Some(dec("-7")));
        assert_eq!(leading_number("+3"), Some(dec("3")));
        assert_eq!(leading_number(".5"), Some(dec("0.5")));
    }

    #[test]
    fn test_comma_decimal() {
        assert_eq!(leading_number("12,5"), Some(dec("12.5")));
        assert_eq!(leading_number("7,"), Some(dec("7")));
    }

    #[test]
    fn test_prefix_semantics() {
        assert_eq!(leading_number("42abc"), Some(dec("42")));
        assert_eq!(leading_number("300р"), Some(dec("300")));
        assert_eq!(leading_number("1e3"), Some(dec("1000")));
    }

    #[test]
    fn test_labels_are_not_numeric() {
        for label in ["GSM", "zzz999", "не число", "", "-", ".", "Гаджеты"] {
            assert!(!is_numeric(label), "{:?} should be a label", label);
        }
    }

    #[test]
    fn test_out_of_range_numbers_are_still_values() {
        for value in ["1e100", "1e-40", "12345678901234567890123456789012"] {
            assert!(is_numeric(value), "{:?} should be a value", value);
            assert_eq!(leading_number(value), None);
        }
    }
}

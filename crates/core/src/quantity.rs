//! Quantity parsing.
//!
//! Quantities arrive as free text from the user. Parsing is lenient in the way
//! browser number inputs are: leading whitespace is skipped and the longest
//! numeric prefix is taken (`"3 kg"` parses as `3`). Text with no numeric
//! prefix, or a non-finite value, is rejected.

use crate::error::{ValidationError, ValidationResult};

/// Item quantity. May be fractional or negative.
pub type Quantity = f64;

/// Parse the leading numeric prefix of `text`.
pub fn parse_quantity(text: &str) -> ValidationResult<Quantity> {
    let trimmed = text.trim_start();
    let len = numeric_prefix_len(trimmed.as_bytes());
    if len == 0 {
        return Err(ValidationError::not_a_number(text));
    }

    let value: f64 = trimmed[..len]
        .parse()
        .map_err(|_| ValidationError::not_a_number(text))?;

    if !value.is_finite() {
        return Err(ValidationError::not_a_number(text));
    }

    Ok(value)
}

/// Length of the longest prefix shaped like `[+-]?(d+(.d*)?|.d+)([eE][+-]?d+)?`.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - (i + 1);
        if int_digits > 0 || frac_digits > 0 {
            i = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_quantity("3").unwrap(), 3.0);
        assert_eq!(parse_quantity("2.5").unwrap(), 2.5);
        assert_eq!(parse_quantity("-1").unwrap(), -1.0);
        assert_eq!(parse_quantity(".5").unwrap(), 0.5);
        assert_eq!(parse_quantity("4.").unwrap(), 4.0);
        assert_eq!(parse_quantity("1e2").unwrap(), 100.0);
    }

    #[test]
    fn takes_leading_numeric_prefix() {
        assert_eq!(parse_quantity("  3 kg").unwrap(), 3.0);
        assert_eq!(parse_quantity("12abc").unwrap(), 12.0);
        assert_eq!(parse_quantity("7e").unwrap(), 7.0);
        assert_eq!(parse_quantity("7e+").unwrap(), 7.0);
    }

    #[test]
    fn zero_parses_as_zero() {
        assert_eq!(parse_quantity("0").unwrap(), 0.0);
        assert_eq!(parse_quantity("0.0").unwrap(), 0.0);
    }

    #[test]
    fn rejects_text_without_numeric_prefix() {
        for text in ["", "   ", "abc", ".", "-", "+.", "e5", "Infinity", "NaN"] {
            assert!(
                matches!(parse_quantity(text), Err(ValidationError::NotANumber(_))),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflow_to_infinity() {
        assert!(parse_quantity("1e999").is_err());
    }

    proptest! {
        #[test]
        fn finite_floats_survive_display(x in -1.0e12f64..1.0e12f64) {
            let text = x.to_string();
            prop_assert_eq!(parse_quantity(&text).unwrap(), x);
        }
    }
}

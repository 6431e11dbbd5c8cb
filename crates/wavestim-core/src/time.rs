//! Time literal encoding
//!
//! Time fields carry a unit suffix (`p`, `n`, `u`, `m`) and an optional
//! fractional part. They are converted to integer picosecond strings by
//! digit manipulation alone: no floating point, no rounding, and
//! arbitrarily large times survive unchanged.

use crate::types::{Result, WaveformError};

/// Zeros appended to reach picoseconds for each recognized unit.
fn unit_padding(literal: &str, unit: char) -> Result<&'static str> {
    match unit {
        'p' => Ok(""),
        'n' => Ok("000"),
        'u' => Ok("000000"),
        'm' => Ok("000000000"),
        _ => Err(WaveformError::UnrecognizedTimeUnit {
            literal: literal.to_string(),
            unit,
        }),
    }
}

/// Convert a time literal like `12.5n` into a picosecond digit string.
///
/// Each fractional digit consumes one zero of the unit padding, so `12.5n`
/// becomes `12500` and `1.25u` becomes `1250000`. A fraction finer than the
/// unit's padding shrinks the padding to nothing; the digits themselves are
/// never dropped.
pub fn encode_time(literal: &str) -> Result<String> {
    let unit = literal
        .chars()
        .last()
        .ok_or_else(|| WaveformError::MalformedTime(literal.to_string()))?;
    let zeros = unit_padding(literal, unit)?;
    let number = &literal[..literal.len() - unit.len_utf8()];

    match literal.find('.') {
        Some(dot) => {
            let digits: String = number.chars().filter(|&c| c != '.').collect();
            let consumed = literal.len() - dot - 2;
            let pad = zeros.get(consumed..).unwrap_or("");
            Ok(format!("{digits}{pad}"))
        }
        None => Ok(format!("{number}{zeros}")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_units() {
        assert_eq!(encode_time("100p").unwrap(), "100");
        assert_eq!(encode_time("10n").unwrap(), "10000");
        assert_eq!(encode_time("7u").unwrap(), "7000000");
        assert_eq!(encode_time("5m").unwrap(), "5000000000");
    }

    #[test]
    fn test_fractional_digits_consume_padding() {
        assert_eq!(encode_time("12.5n").unwrap(), "12500");
        assert_eq!(encode_time("1.25u").unwrap(), "1250000");
        assert_eq!(encode_time("0.5n").unwrap(), "0500");
    }

    #[test]
    fn test_fraction_exhausts_padding_without_rounding() {
        // Three fractional digits use up all of `n`'s padding.
        assert_eq!(encode_time("1.234n").unwrap(), "1234");
        // A fourth digit has nothing left to consume; it is kept anyway.
        assert_eq!(encode_time("1.2345n").unwrap(), "12345");
    }

    #[test]
    fn test_long_times_pass_through() {
        assert_eq!(
            encode_time("123456789012345678901m").unwrap(),
            "123456789012345678901000000000"
        );
    }

    #[test]
    fn test_unrecognized_unit() {
        let err = encode_time("10s").unwrap_err();
        assert!(matches!(
            err,
            WaveformError::UnrecognizedTimeUnit { unit: 's', .. }
        ));
    }

    #[test]
    fn test_empty_literal() {
        assert!(matches!(
            encode_time("").unwrap_err(),
            WaveformError::MalformedTime(_)
        ));
    }
}

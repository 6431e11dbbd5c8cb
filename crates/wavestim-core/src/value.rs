//! Value literal normalization and rendering
//!
//! Sample values arrive with a radix prefix (`b`, `d`, `h`) or as a bare
//! scalar bit. Internally every value is held in canonical form: the bare
//! scalars `0`/`1`, or binary digits behind a `b` prefix.

use crate::types::{Result, WaveformError};

fn malformed(literal: &str) -> WaveformError {
    WaveformError::MalformedValue(literal.to_string())
}

/// Normalize a value literal to canonical form.
///
/// `d` and `h` values are re-rendered as natural-width binary; `b` values
/// and the bare scalars `0`/`1` pass through unchanged. Anything else is a
/// malformed value.
pub fn normalize(literal: &str) -> Result<String> {
    if literal.starts_with('b') {
        Ok(literal.to_string())
    } else if let Some(rest) = literal.strip_prefix('d') {
        let n: u128 = rest.parse().map_err(|_| malformed(literal))?;
        Ok(format!("b{n:b}"))
    } else if let Some(rest) = literal.strip_prefix('h') {
        let n = u128::from_str_radix(rest, 16).map_err(|_| malformed(literal))?;
        Ok(format!("b{n:b}"))
    } else if literal == "0" || literal == "1" {
        Ok(literal.to_string())
    } else {
        Err(malformed(literal))
    }
}

/// Render a canonical value as a VCD change entry for `symbol`.
///
/// Scalar values sit directly against the identifier; vector (`b…`) values
/// take a separating space, per VCD syntax.
pub fn vcd_change(value: &str, symbol: char) -> String {
    if value.len() > 1 {
        format!("{value} {symbol}")
    } else {
        format!("{value}{symbol}")
    }
}

/// Render a canonical value as a fixed-width `.vec` data field.
///
/// Bare scalars pass through. For `b…` values the digit payload is read as
/// a decimal number and zero-padded to `width`. The padding works on the
/// digit string directly, so signals wider than a machine integer still
/// render exactly.
pub fn vec_field(value: &str, width: u32) -> String {
    if value == "0" || value == "1" {
        return value.to_string();
    }
    let payload = value.strip_prefix('b').unwrap_or(value);
    let digits = match payload.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let width = width as usize;
    if digits.len() >= width {
        digits.to_string()
    } else {
        format!("{}{}", "0".repeat(width - digits.len()), digits)
    }
}

// ============================================================================
// Tests
// ============================================================================

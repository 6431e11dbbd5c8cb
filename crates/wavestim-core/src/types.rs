//! Common types, errors, and constants for waveform table operations

use std::fmt;

use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// First printable ASCII character usable as a VCD identifier symbol.
pub const FIRST_SYMBOL: u8 = b'!';
/// Last printable ASCII character usable as a VCD identifier symbol.
pub const LAST_SYMBOL: u8 = b'~';
/// Number of distinct single-character VCD symbols, and therefore the
/// maximum number of signal columns a table may carry.
pub const MAX_SIGNALS: usize = (LAST_SYMBOL - FIRST_SYMBOL + 1) as usize;

/// VCD identifier symbol for the signal at `index` in declaration order.
///
/// Symbols are the printable ASCII range `!`..=`~`, assigned in order. The
/// parser rejects tables with more than [`MAX_SIGNALS`] columns before any
/// symbol is handed out.
pub fn symbol_for_index(index: usize) -> char {
    debug_assert!(index < MAX_SIGNALS);
    (FIRST_SYMBOL + index as u8) as char
}

// ============================================================================
// Error Types
// ============================================================================

/// A single value cell that failed to normalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadValue {
    /// 1-based line number in the CSV input.
    pub line: usize,
    /// Name of the signal column the cell belongs to.
    pub signal: String,
    /// The offending literal, as read.
    pub literal: String,
}

impl fmt::Display for BadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, signal '{}': \"{}\"",
            self.line, self.signal, self.literal
        )
    }
}

fn list_bad_values(values: &[BadValue]) -> String {
    values
        .iter()
        .map(BadValue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for waveform CSV conversion
#[derive(Debug, Error)]
pub enum WaveformError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognizable unit of time '{unit}' in \"{literal}\"")]
    UnrecognizedTimeUnit { literal: String, unit: char },

    #[error("time literal \"{0}\" has no unit suffix")]
    MalformedTime(String),

    #[error("incorrect value format \"{0}\"")]
    MalformedValue(String),

    #[error("{} malformed value literal(s): {}", .0.len(), list_bad_values(.0))]
    MalformedValues(Vec<BadValue>),

    #[error("row {row}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid bit range in header \"{0}\"")]
    MalformedHeader(String),

    #[error("{0} signal columns exceed the {max} available VCD symbols", max = MAX_SIGNALS)]
    TooManySignals(usize),

    #[error("signal '{signal}' declares a non-zero low bit index {lo}")]
    NonZeroLowIndex { signal: String, lo: u32 },

    #[error("input has no header row")]
    MissingHeader,
}

pub type Result<T> = std::result::Result<T, WaveformError>;

// ============================================================================
// Data Structures
// ============================================================================

/// Timing and voltage parameters copied verbatim into the `.vcdinfo` and
/// `.vec` outputs.
#[derive(Debug, Clone)]
pub struct StimulusParams {
    pub trise: String,
    pub tfall: String,
    pub vih: String,
    pub vil: String,
}

impl Default for StimulusParams {
    fn default() -> Self {
        Self {
            trise: "10".into(),
            tfall: "10".into(),
            vih: "1".into(),
            vil: "0".into(),
        }
    }
}

/// A named waveform track: one signal column of the CSV table.
#[derive(Debug, Clone)]
pub struct Signal {
    /// Identifier with any bit-range suffix stripped.
    pub name: String,
    /// Declared width in bits; 1 unless the header carried a range suffix.
    pub bit_width: u32,
    /// Canonical value strings, one per time sample.
    pub values: Vec<String>,
}

impl Signal {
    pub(crate) fn new(name: String, bit_width: u32) -> Self {
        Self {
            name,
            bit_width,
            values: Vec::new(),
        }
    }

    /// Normalize and append one sample value.
    pub fn add_value(&mut self, literal: &str) -> Result<()> {
        self.values.push(crate::value::normalize(literal)?);
        Ok(())
    }

    /// Name used in the `.vec` `vname` header line.
    ///
    /// Multi-bit signals render with an upper index one above the declared
    /// width; downstream consumers expect this exact spelling.
    pub fn vec_name(&self) -> String {
        if self.bit_width == 1 {
            self.name.clone()
        } else {
            format!("{}<<{}:0>>", self.name, self.bit_width + 1)
        }
    }

    /// Render the value at sample `idx` as a `.vec` data field.
    pub fn vec_value(&self, idx: usize) -> String {
        crate::value::vec_field(&self.values[idx], self.bit_width)
    }
}

/// Parsed waveform table: the ordered signal set, the aligned picosecond
/// time axis, and the stimulus parameters.
///
/// Built once by the parser and immutable afterwards. Every signal's
/// `values` has the same length as `time`, and the signal order fixes both
/// the emission order and the VCD symbol assignment.
#[derive(Debug, Clone)]
pub struct WaveformTable {
    /// Signals in CSV column order.
    pub signals: Vec<Signal>,
    /// Canonical picosecond time strings, index-aligned with each signal's
    /// `values`.
    pub time: Vec<String>,
    pub trise: String,
    pub tfall: String,
    pub vih: String,
    pub vil: String,
}

impl WaveformTable {
    /// Number of time samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl fmt::Display for WaveformTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "time")?;
        for sig in &self.signals {
            write!(f, ",{}", sig.name)?;
        }
        writeln!(f)?;

        for (i, t) in self.time.iter().enumerate() {
            write!(f, "{}", t)?;
            for sig in &self.signals {
                write!(f, ",{}", sig.values[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_range() {
        assert_eq!(symbol_for_index(0), '!');
        assert_eq!(symbol_for_index(1), '"');
        assert_eq!(symbol_for_index(MAX_SIGNALS - 1), '~');
        assert_eq!(MAX_SIGNALS, 94);
    }

    #[test]
    fn test_vec_name_scalar() {
        let sig = Signal::new("clk".into(), 1);
        assert_eq!(sig.vec_name(), "clk");
    }

    #[test]
    fn test_vec_name_vector_upper_index() {
        // The upper index is width + 1, not width - 1.
        let sig = Signal::new("data".into(), 5);
        assert_eq!(sig.vec_name(), "data<<6:0>>");
    }

    #[test]
    fn test_display_round_trips_cells() {
        let mut a = Signal::new("a".into(), 1);
        a.add_value("1").unwrap();
        let mut b = Signal::new("b".into(), 2);
        b.add_value("b10").unwrap();

        let table = WaveformTable {
            signals: vec![a, b],
            time: vec!["10000".into()],
            trise: "10".into(),
            tfall: "10".into(),
            vih: "1".into(),
            vil: "0".into(),
        };

        assert_eq!(table.to_string(), "time,a,b\n10000,1,b10\n");
    }
}

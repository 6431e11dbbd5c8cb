//! # Waveform CSV Converter - Core Library
//!
//! A library for turning tabular CSV descriptions of digital-signal
//! waveforms into simulation stimulus files.
//!
//! ## Input Format
//!
//! One column per signal, one row per time sample:
//!
//! ```text
//! time, a, b, c, d[3:0], e[2:0], f[7:0]
//!  10n, 0, 1, 0,    d10,   b111,    hff
//! 12.5n, 1, 0, 0,    d5,   b010,    ha9
//! ```
//!
//! Header columns may carry a `[hi:lo]` or `<hi:lo>` bit-range suffix. Time
//! literals take a `p`/`n`/`u`/`m` unit suffix with an optional fractional
//! part; values take a `b`/`d`/`h` radix prefix or are bare `0`/`1` bits.
//!
//! ## Outputs
//!
//! - `.vcd`: Value Change Dump trace (change detection per signal)
//! - `.vcdinfo`: timing/voltage parameter sidecar
//! - `.vec`: fixed-field stimulus vectors (every sample, every signal)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wavestim_core::{convert, StimulusParams};
//!
//! let outputs = convert("stimulus.csv", &StimulusParams::default()).unwrap();
//! println!("Wrote {}", outputs.vcd.display());
//! ```
//!
//! ## Enabling Logging
//!
//! This library uses `tracing` for structured logging. To see log output,
//! initialize a tracing subscriber in your application:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt::init();
//!
//! let table = wavestim_core::read("stimulus.csv", &Default::default()).unwrap();
//! ```

mod parser;
mod time;
mod types;
mod value;
mod writer;

// Re-export public types
pub use types::{
    symbol_for_index,
    BadValue,
    Result,
    Signal,
    StimulusParams,
    WaveformError,
    WaveformTable,
    MAX_SIGNALS,
};

// Re-export writers
pub use writer::{write_vcd, write_vcdinfo, write_vec, Conversion};

// Re-export codecs and the reader-based parser for advanced use
pub use parser::parse_csv_reader;
pub use time::encode_time;
pub use value::normalize;

use std::path::Path;

// ============================================================================
// Public API Functions
// ============================================================================

/// Parse a waveform CSV file.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `params` - Timing/voltage parameters carried into the outputs
///
/// # Returns
/// * `Ok(WaveformTable)` - Parsed waveform table
/// * `Err(WaveformError)` - If the file cannot be read or parsed
///
/// # Example
/// ```rust,no_run
/// let table = wavestim_core::read("stimulus.csv", &Default::default()).unwrap();
/// println!("{} signals, {} samples", table.signals.len(), table.len());
/// ```
pub fn read(path: impl AsRef<Path>, params: &StimulusParams) -> Result<WaveformTable> {
    parser::parse_csv_impl(path.as_ref(), params)
}

/// Convert a waveform CSV file to `.vcd`, `.vcdinfo`, and `.vec` files.
///
/// Output files are written next to the input; a trailing `.csv` extension
/// is stripped from the base name. Each output is rendered in full before
/// anything touches the disk, so a failed conversion leaves no truncated
/// files behind.
///
/// # Returns
/// * `Ok(Conversion)` - Paths of the three generated files
/// * `Err(WaveformError)` - If parsing or writing fails
pub fn convert(path: impl AsRef<Path>, params: &StimulusParams) -> Result<Conversion> {
    writer::convert_impl(path.as_ref(), params)
}

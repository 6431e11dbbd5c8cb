//! Waveform CSV parser

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::time::encode_time;
use crate::types::{
    BadValue, Result, Signal, StimulusParams, WaveformError, WaveformTable, MAX_SIGNALS,
};

/// Bit-range suffix anchored at the end of a header name, with square or
/// angle brackets: `name[hi:lo]` or `name<hi:lo>`.
const RANGE_SUFFIX: &str = r"(.+)[<\[]([0-9]+):([0-9]+)[>\]]$";

/// Split a CSV row into whitespace-trimmed fields.
fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Build a [`Signal`] from one header column.
///
/// A matching range suffix sets `bit_width = hi + 1`; the low index must be
/// zero. Without a suffix the column is a 1-bit signal named by the literal
/// header text.
fn parse_signal_header(range: &Regex, header: &str) -> Result<Signal> {
    if let Some(caps) = range.captures(header) {
        let name = caps[1].to_string();
        let hi: u32 = caps[2]
            .parse()
            .map_err(|_| WaveformError::MalformedHeader(header.to_string()))?;
        let lo: u32 = caps[3]
            .parse()
            .map_err(|_| WaveformError::MalformedHeader(header.to_string()))?;
        if lo != 0 {
            return Err(WaveformError::NonZeroLowIndex { signal: name, lo });
        }
        Ok(Signal::new(name, hi + 1))
    } else {
        Ok(Signal::new(header.to_string(), 1))
    }
}

/// Parse a waveform CSV file into a [`WaveformTable`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn parse_csv_impl(path: &Path, params: &StimulusParams) -> Result<WaveformTable> {
    let file = File::open(path)?;
    parse_csv_reader(BufReader::new(file), params)
}

/// Parse waveform CSV text from any buffered reader.
///
/// The first non-blank row is the header; its leading column is the time
/// axis label and is discarded. Each later row contributes one time sample:
/// a time literal followed by one value literal per signal. Malformed value
/// cells are collected across the whole input and reported together.
pub fn parse_csv_reader<R: BufRead>(reader: R, params: &StimulusParams) -> Result<WaveformTable> {
    let range = Regex::new(RANGE_SUFFIX).unwrap();

    let mut signals: Vec<Signal> = Vec::new();
    let mut time: Vec<String> = Vec::new();
    let mut bad_values: Vec<BadValue> = Vec::new();
    let mut saw_header = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let row = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_row(&line);

        if !saw_header {
            for &header in &fields[1..] {
                signals.push(parse_signal_header(&range, header)?);
            }
            if signals.len() > MAX_SIGNALS {
                return Err(WaveformError::TooManySignals(signals.len()));
            }
            saw_header = true;
            debug!(signals = signals.len(), "Parsed header row");
            continue;
        }

        if fields.len() < signals.len() + 1 {
            return Err(WaveformError::MalformedRow {
                row,
                expected: signals.len() + 1,
                found: fields.len(),
            });
        }

        time.push(encode_time(fields[0])?);
        for (i, sig) in signals.iter_mut().enumerate() {
            let literal = fields[i + 1];
            match sig.add_value(literal) {
                Ok(()) => {}
                Err(WaveformError::MalformedValue(_)) => {
                    bad_values.push(BadValue {
                        line: row,
                        signal: sig.name.clone(),
                        literal: literal.to_string(),
                    });
                    // keep columns aligned while scanning for more bad cells
                    sig.values.push("b0".to_string());
                }
                Err(e) => return Err(e),
            }
        }
    }

    if !saw_header {
        return Err(WaveformError::MissingHeader);
    }
    if !bad_values.is_empty() {
        warn!(count = bad_values.len(), "Malformed value literals in input");
        return Err(WaveformError::MalformedValues(bad_values));
    }

    info!(
        signals = signals.len(),
        samples = time.len(),
        "Parsed CSV table"
    );

    Ok(WaveformTable {
        signals,
        time,
        trise: params.trise.clone(),
        tfall: params.tfall.clone(),
        vih: params.vih.clone(),
        vil: params.vil.clone(),
    })
}

// ============================================================================
// Tests
// ============================================================================

//! VCD, VCDINFO, and VEC stimulus writers

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, instrument};

use crate::types::{symbol_for_index, Result, Signal, StimulusParams, WaveformTable};
use crate::value::vcd_change;

/// Write the VCD header: date, timescale, one `$var` per signal.
fn write_vcd_header<W: Write>(table: &WaveformTable, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "$date {} $end",
        Local::now().format("%B %d %Y, %H:%M")
    )?;
    writeln!(writer, "$timescale 1ps $end")?;
    for (i, sig) in table.signals.iter().enumerate() {
        writeln!(
            writer,
            "$var wire {} {} {} $end",
            sig.bit_width,
            symbol_for_index(i),
            sig.name
        )?;
    }
    writeln!(writer, "$enddefinitions $end")?;
    Ok(())
}

/// Write a value-change dump of the table.
///
/// The first sample is dumped unconditionally under `$dumpvars`. Every later
/// sample gets a timestamp line, even when nothing changed, followed by one
/// change entry per signal whose value differs from the previous sample, in
/// declaration order.
pub fn write_vcd<W: Write>(table: &WaveformTable, writer: &mut W) -> Result<()> {
    write_vcd_header(table, writer)?;

    writeln!(writer, "#0")?;
    writeln!(writer, "$dumpvars")?;
    for (i, sig) in table.signals.iter().enumerate() {
        if let Some(value) = sig.values.first() {
            writeln!(writer, "{}", vcd_change(value, symbol_for_index(i)))?;
        }
    }
    writeln!(writer, "$end")?;

    for t in 1..table.time.len() {
        writeln!(writer, "#{}", table.time[t])?;
        for (i, sig) in table.signals.iter().enumerate() {
            if sig.values[t] != sig.values[t - 1] {
                writeln!(writer, "{}", vcd_change(&sig.values[t], symbol_for_index(i)))?;
            }
        }
    }

    Ok(())
}

/// Write the `.vcdinfo` parameter dump: five fixed key-value lines and the
/// `.in` signal list. No change detection, purely a static dump.
pub fn write_vcdinfo<W: Write>(table: &WaveformTable, writer: &mut W) -> Result<()> {
    writeln!(writer, ".hier 0")?;
    writeln!(writer, ".trise {}", table.trise)?;
    writeln!(writer, ".tfall {}", table.tfall)?;
    writeln!(writer, ".vih {}", table.vih)?;
    writeln!(writer, ".vil {}", table.vil)?;

    let names: Vec<String> = table
        .signals
        .iter()
        .map(|sig| {
            if sig.bit_width > 1 {
                format!("{}[{}:0]", sig.name, sig.bit_width - 1)
            } else {
                sig.name.clone()
            }
        })
        .collect();
    write!(writer, ".in {}", names.join(" "))?;
    Ok(())
}

/// Write the `.vec` stimulus file: per-signal header lines, then one data
/// line per time sample. Every sample is emitted unconditionally.
pub fn write_vec<W: Write>(table: &WaveformTable, writer: &mut W) -> Result<()> {
    let radix: Vec<String> = table
        .signals
        .iter()
        .map(|sig| "1".repeat(sig.bit_width as usize))
        .collect();
    let io: Vec<String> = table
        .signals
        .iter()
        .map(|sig| "i".repeat(sig.bit_width as usize))
        .collect();
    let vnames: Vec<String> = table.signals.iter().map(Signal::vec_name).collect();

    writeln!(writer, "radix {}", radix.join(" "))?;
    writeln!(writer, "io {}", io.join(" "))?;
    writeln!(writer, "vname {}", vnames.join(" "))?;
    writeln!(writer, "trise {}", table.trise)?;
    writeln!(writer, "tfall {}", table.tfall)?;
    writeln!(writer, "vih {}", table.vih)?;
    writeln!(writer, "vil {}", table.vil)?;
    writeln!(writer, "tunit 1ps")?;

    for (idx, t) in table.time.iter().enumerate() {
        write!(writer, "{}", t)?;
        for sig in &table.signals {
            write!(writer, " {}", sig.vec_value(idx))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Paths produced by a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub vcd: PathBuf,
    pub vcdinfo: PathBuf,
    pub vec: PathBuf,
}

/// Output base path: the input with a trailing `.csv` stripped; any other
/// name is kept whole.
fn output_base(input: &Path) -> PathBuf {
    let name = input.to_string_lossy();
    match name.strip_suffix(".csv") {
        Some(base) if !base.is_empty() => PathBuf::from(base),
        _ => input.to_path_buf(),
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Render one output fully into memory, then write it to disk in a single
/// step, so a conversion that fails mid-render leaves no truncated file.
fn write_whole(path: &Path, render: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<()> {
    let mut buf = Vec::new();
    render(&mut buf)?;
    fs::write(path, &buf)?;
    debug!(path = %path.display(), bytes = buf.len(), "Wrote output");
    Ok(())
}

/// Convert a waveform CSV into `.vcd`, `.vcdinfo`, and `.vec` files next to
/// the input.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn convert_impl(input: &Path, params: &StimulusParams) -> Result<Conversion> {
    info!("Converting CSV waveform table");
    let table = crate::parser::parse_csv_impl(input, params)?;

    let base = output_base(input);
    let outputs = Conversion {
        vcd: with_suffix(&base, ".vcd"),
        vcdinfo: with_suffix(&base, ".vcdinfo"),
        vec: with_suffix(&base, ".vec"),
    };

    write_whole(&outputs.vcd, |w| write_vcd(&table, w))?;
    write_whole(&outputs.vcdinfo, |w| write_vcdinfo(&table, w))?;
    write_whole(&outputs.vec, |w| write_vec(&table, w))?;

    info!(
        signals = table.signals.len(),
        samples = table.len(),
        "Conversion complete"
    );

    Ok(outputs)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv_reader;
    use std::io::Cursor;

    fn table(text: &str) -> WaveformTable {
        parse_csv_reader(Cursor::new(text), &StimulusParams::default()).unwrap()
    }

    fn render<F>(table: &WaveformTable, f: F) -> String
    where
        F: FnOnce(&WaveformTable, &mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_vcd_header_declares_signals_in_order() {
        let t = table("time, a, b[1:0]\n10n, 1, b10\n");
        let out = render(&t, write_vcd);
        assert!(out.contains("$timescale 1ps $end\n"));
        assert!(out.contains("$var wire 1 ! a $end\n"));
        assert!(out.contains("$var wire 2 \" b $end\n"));
        assert!(out.contains("$enddefinitions $end\n"));
    }

    #[test]
    fn test_vcd_initial_dump_is_unconditional() {
        let t = table("time, a, b[1:0]\n10n, 0, b10\n");
        let out = render(&t, write_vcd);
        assert!(out.contains("#0\n$dumpvars\n0!\nb10 \"\n$end\n"));
    }

    #[test]
    fn test_vcd_change_detection() {
        let t = table("time, a, b[1:0]\n10n, 1, b10\n12n, 0, b10\n");
        let out = render(&t, write_vcd);
        let after_dump = out.split("$end\n").last().unwrap();
        assert!(after_dump.contains("#12000\n0!\n"));
        // `b` never changes after the initial dump.
        assert!(!after_dump.contains('"'));
    }

    #[test]
    fn test_vcd_timestamp_not_suppressed() {
        let t = table("time, a\n10n, 1\n20n, 1\n");
        let out = render(&t, write_vcd);
        assert!(out.ends_with("#20000\n"));
    }

    #[test]
    fn test_vcdinfo_static_dump() {
        let t = table("time, a, b[1:0]\n10n, 1, b10\n");
        let out = render(&t, write_vcdinfo);
        assert_eq!(
            out,
            ".hier 0\n.trise 10\n.tfall 10\n.vih 1\n.vil 0\n.in a b[1:0]"
        );
    }

    #[test]
    fn test_vec_output() {
        let t = table("time, a, b[1:0]\n10n, 1, b10\n12n, 0, b10\n");
        let out = render(&t, write_vec);
        assert_eq!(
            out,
            "radix 1 11\n\
             io i ii\n\
             vname a b<<3:0>>\n\
             trise 10\n\
             tfall 10\n\
             vih 1\n\
             vil 0\n\
             tunit 1ps\n\
             10000 1 10\n\
             12000 0 10\n"
        );
    }

    #[test]
    fn test_output_base_strips_csv_only() {
        assert_eq!(output_base(Path::new("a/b.csv")), PathBuf::from("a/b"));
        assert_eq!(
            output_base(Path::new("a/b.txt")),
            PathBuf::from("a/b.txt")
        );
        assert_eq!(output_base(Path::new(".csv")), PathBuf::from(".csv"));
    }
}

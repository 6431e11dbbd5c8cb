//! wavestim CLI: convert waveform CSV tables into VCD and VEC stimulus
//! files.
//!
//! Thin shell around `wavestim-core`: argument parsing, subscriber setup,
//! and exit-code mapping live here; everything else is in the library.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wavestim_core::{convert, read, StimulusParams};

/// Convert a waveform CSV table into `.vcd`, `.vcdinfo`, and `.vec` files.
#[derive(Parser, Debug)]
#[command(name = "wavestim", version, about = "CSV to VCD/VEC stimulus converter")]
struct Cli {
    /// Input CSV file: first column time, remaining columns signals.
    input: PathBuf,

    /// Rise time written into the output parameter sections.
    #[arg(long, default_value = "10")]
    trise: String,

    /// Fall time written into the output parameter sections.
    #[arg(long, default_value = "10")]
    tfall: String,

    /// Input-high voltage level.
    #[arg(long, default_value = "1")]
    vih: String,

    /// Input-low voltage level.
    #[arg(long, default_value = "0")]
    vil: String,

    /// Print the parsed table to stdout instead of writing output files.
    #[arg(long)]
    print_table: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn params(&self) -> StimulusParams {
        StimulusParams {
            trise: self.trise.clone(),
            tfall: self.tfall.clone(),
            vih: self.vih.clone(),
            vil: self.vil.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        process::exit(1);
    });

    init_tracing(cli.verbose);
    let params = cli.params();

    let result = if cli.print_table {
        read(&cli.input, &params).map(|table| print!("{table}"))
    } else {
        convert(&cli.input, &params).map(|_| ())
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

//! Command-line argument definitions for the HOBO reader
//!
//! This module defines the CLI interface using the clap derive API.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ReaderConfig;

/// CLI arguments for the HOBO export reader
///
/// Reads one HOBOware CSV export and writes its records as plain CSV.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hobo",
    version,
    about = "Read a HOBO data logger CSV export and print its records",
    long_about = "Reads a CSV file exported by HOBOware from a HOBO temperature/humidity logger, \
                  recovers the logger serial number, plot title and temperature unit, and writes \
                  one CSV row per sample (timestamp, temperature, RH, battery)."
)]
pub struct Args {
    /// HOBOware CSV export to read
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Write records to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Convert timestamps to this UTC offset (e.g. GMT-07:00, +00:00, -7)
    #[arg(
        short = 't',
        long = "timezone",
        value_name = "OFFSET",
        allow_hyphen_values = true
    )]
    pub timezone: Option<String>,

    /// UTC offset to assume when the export does not declare one
    #[arg(long = "assume-timezone", value_name = "OFFSET", allow_hyphen_values = true)]
    pub assume_timezone: Option<String>,

    /// Report logger event rows (empty temperature) as errors instead of skipping them
    #[arg(long = "keep-event-rows")]
    pub keep_event_rows: bool,

    /// Abort on the first unparseable row instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the reader configuration from the CLI flags
    pub fn to_reader_config(&self) -> ReaderConfig {
        let mut config = ReaderConfig::default().with_skip_event_rows(!self.keep_event_rows);
        if let Some(offset) = &self.timezone {
            config = config.with_target_offset(offset.clone());
        }
        if let Some(offset) = &self.assume_timezone {
            config = config.with_default_offset(offset.clone());
        }
        config
    }
}

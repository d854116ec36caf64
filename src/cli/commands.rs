//! Command implementation for the HOBO reader CLI
//!
//! Opens one export, streams its records to CSV, and reports a summary.

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;
use tracing::{debug, warn};

use crate::app::models::Record;
use crate::app::services::hobo_csv_reader::{HoboCsvReader, ReadStats};
use crate::cli::args::Args;

/// Flat CSV row written for each record
#[derive(Debug, Serialize)]
pub struct OutputRow {
    pub line: u64,
    pub timestamp: String,
    pub temperature: f64,
    pub unit: &'static str,
    pub relative_humidity: Option<f64>,
    pub battery: Option<f64>,
}

impl From<&Record> for OutputRow {
    fn from(record: &Record) -> Self {
        Self {
            line: record.line,
            timestamp: record.timestamp.to_string(),
            temperature: record.temperature,
            unit: record.unit.symbol(),
            relative_humidity: record.relative_humidity,
            battery: record.battery,
        }
    }
}

/// Main command runner for the HOBO reader
pub fn run(args: Args) -> Result<ReadStats> {
    let start_time = Instant::now();

    setup_logging(&args);
    debug!("Arguments: {:?}", args);

    let config = args.to_reader_config();
    let mut reader = HoboCsvReader::open_with_config(&args.input, &config)
        .with_context(|| format!("Failed to open HOBO export {}", args.input.display()))?;

    print_header(&reader);

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(output);

    for result in reader.by_ref() {
        match result {
            Ok(record) => writer
                .serialize(OutputRow::from(&record))
                .context("Failed to write record")?,
            Err(e) if e.is_row_error() && !args.strict => warn!("Skipping row: {}", e),
            Err(e) => return Err(e).context("Aborted reading export"),
        }
    }
    writer.flush().context("Failed to flush output")?;

    let stats = reader.stats().clone();
    reader.close();

    print_summary(&stats, start_time.elapsed().as_millis());
    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hobo_reader={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Header details go to stderr so stdout stays plain CSV
fn print_header<R: std::io::Read>(reader: &HoboCsvReader<R>) {
    eprintln!(
        "{} {}",
        "Title:".bright_cyan(),
        reader.title().bright_white().bold()
    );
    eprintln!(
        "{} {}",
        "Serial number:".bright_cyan(),
        reader.serial_number().bright_white()
    );
    eprintln!(
        "{} {}",
        "Temperature unit:".bright_cyan(),
        reader.unit().to_string().bright_white()
    );
    if let Some(offset) = reader.utc_offset() {
        eprintln!(
            "{} {}",
            "UTC offset:".bright_cyan(),
            offset.to_string().bright_white()
        );
    }
}

fn print_summary(stats: &ReadStats, elapsed_ms: u128) {
    eprintln!("\n{}", "Read Summary".bright_green().bold());
    eprintln!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        elapsed_ms.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Records:".bright_cyan(),
        stats.records_produced.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {}",
        "Lines skipped:".bright_cyan(),
        stats.lines_skipped.to_string().bright_white()
    );
    if stats.has_errors() {
        eprintln!(
            "  {} {}",
            "Rows failed:".bright_red(),
            stats.row_errors.to_string().bright_red().bold()
        );
        eprintln!(
            "  {} {:.1}%",
            "Success rate:".bright_cyan(),
            stats.success_rate()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{TemperatureUnit, Timestamp};
    use chrono::NaiveDate;

    #[test]
    fn test_output_row_from_record() {
        let record = Record {
            line: 7,
            timestamp: Timestamp::Local(
                NaiveDate::from_ymd_opt(2017, 1, 13)
                    .unwrap()
                    .and_hms_opt(1, 0, 0)
                    .unwrap(),
            ),
            temperature: 31.4,
            unit: TemperatureUnit::Fahrenheit,
            relative_humidity: None,
            battery: Some(3.5),
        };

        let row = OutputRow::from(&record);
        assert_eq!(row.line, 7);
        assert_eq!(row.timestamp, "2017-01-13T01:00:00");
        assert_eq!(row.unit, "°F");
        assert_eq!(row.relative_humidity, None);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&row).unwrap();
        let written = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            written,
            "line,timestamp,temperature,unit,relative_humidity,battery\n7,2017-01-13T01:00:00,31.4,°F,,3.5\n"
        );
    }
}

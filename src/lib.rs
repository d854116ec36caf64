//! HOBO Reader Library
//!
//! A Rust library for reading the CSV exports that Onset's HOBOware software
//! produces for HOBO temperature/humidity data loggers.
//!
//! This library provides tools for:
//! - Recovering the logger serial number and plot title from the export header
//! - Classifying the data columns (timestamp, temperature, RH, battery)
//! - Detecting the temperature unit and the UTC offset of the timestamps
//! - Lazily iterating typed records, one per data row, with per-row errors
//!
//! ```no_run
//! use hobo_reader::HoboCsvReader;
//!
//! # fn example() -> hobo_reader::Result<()> {
//! let reader = HoboCsvReader::open("U23-001_HOBOware.csv")?;
//! println!("{} ({})", reader.title(), reader.serial_number());
//! for record in reader {
//!     let record = record?;
//!     println!("{} {} {:?}", record.timestamp, record.temperature, record.relative_humidity);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod hobo_csv_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Record, RecordColumns, TemperatureUnit, Timestamp};
pub use app::services::hobo_csv_reader::{ColumnLayout, HeaderMetadata, HoboCsvReader, ReadStats};
pub use config::{ReaderConfig, ReaderRules};

/// Result type alias for the HOBO reader
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for HOBO export reading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Title/serial line or mandatory column could not be recognised
    #[error("Malformed HOBO header in file '{file}': {message}")]
    MalformedHeader { file: String, message: String },

    /// Data row has fewer fields than the column layout requires
    #[error("Truncated row at line {line}: expected at least {expected} fields, found {found}")]
    TruncatedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Timestamp literal matched none of the configured formats
    #[error("Unparseable timestamp at line {line}: '{value}'")]
    UnparseableTimestamp { line: u64, value: String },

    /// Measurement field is not numeric
    #[error("Unparseable {column} value at line {line}: '{value}'")]
    UnparseableNumber {
        line: u64,
        column: String,
        value: String,
    },

    /// CSV tokenising error
    #[error("CSV parsing error in file '{file}': {message}")]
    Csv {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a malformed header error
    pub fn malformed_header(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a truncated row error
    pub fn truncated_row(line: u64, expected: usize, found: usize) -> Self {
        Self::TruncatedRow {
            line,
            expected,
            found,
        }
    }

    /// Create an unparseable timestamp error
    pub fn unparseable_timestamp(line: u64, value: impl Into<String>) -> Self {
        Self::UnparseableTimestamp {
            line,
            value: value.into(),
        }
    }

    /// Create an unparseable number error
    pub fn unparseable_number(
        line: u64,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::UnparseableNumber {
            line,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::Csv {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Line number of the offending data row, for row-level errors
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::TruncatedRow { line, .. }
            | Self::UnparseableTimestamp { line, .. }
            | Self::UnparseableNumber { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether this error concerns a single data row (iteration can continue)
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Self::TruncatedRow { .. }
                | Self::UnparseableTimestamp { .. }
                | Self::UnparseableNumber { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

//! HOBOware CSV reader for HOBO data logger exports
//!
//! This module reads the CSV files HOBOware writes with "Export Table Data":
//! a title line, a column-header row, then one row per logged sample.
//!
//! ## Architecture
//!
//! The reader is organized into logical components:
//! - [`reader`] - File handling and lazy record iteration
//! - [`header`] - Serial number and plot title extraction
//! - [`column_mapping`] - Column classification, unit and UTC offset detection
//! - [`record_parser`] - Individual data row processing
//! - [`field_parsers`] - Timestamp, offset and number parsing
//! - [`stats`] - Reading statistics
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hobo_reader::app::services::hobo_csv_reader::HoboCsvReader;
//!
//! # fn example() -> hobo_reader::Result<()> {
//! let mut reader = HoboCsvReader::open("H08-030-08_HOBOware.csv")?;
//! println!("Logger {} ({})", reader.serial_number(), reader.unit());
//!
//! for record in reader.by_ref() {
//!     match record {
//!         Ok(record) => println!("{} {}", record.timestamp, record.temperature),
//!         Err(e) => eprintln!("skipping: {}", e),
//!     }
//! }
//! println!("{} records", reader.stats().records_produced);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod header;
pub mod reader;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnLayout;
pub use header::HeaderMetadata;
pub use reader::HoboCsvReader;
pub use stats::ReadStats;

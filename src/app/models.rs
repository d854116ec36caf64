//! Core data models for HOBO logger records
//!
//! This module defines the record produced for each data row of a HOBOware
//! export, together with the timestamp and unit types it carries.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature unit declared in the temperature column label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Timestamp of a data row
///
/// HOBOware writes wall-clock times and declares their offset once, in the
/// timestamp column label. Rows from files without that declaration (and no
/// configured default) stay `Local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timestamp {
    /// Wall-clock time with a known UTC offset
    Zoned(DateTime<FixedOffset>),
    /// Wall-clock time, offset unknown
    Local(NaiveDateTime),
}

impl Timestamp {
    /// Wall-clock date and time as written in the file (or after conversion)
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Zoned(dt) => dt.naive_local(),
            Timestamp::Local(naive) => *naive,
        }
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Timestamp::Zoned(dt) => Some(*dt.offset()),
            Timestamp::Local(_) => None,
        }
    }

    /// The instant in UTC, if the offset is known
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Zoned(dt) => Some(dt.with_timezone(&Utc)),
            Timestamp::Local(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
            Timestamp::Local(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// One parsed data row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Physical line number in the export (1-based)
    pub line: u64,

    pub timestamp: Timestamp,

    /// Temperature in `unit`
    pub temperature: f64,

    pub unit: TemperatureUnit,

    /// Relative humidity in percent; `None` when the file has no RH column
    /// or the cell is empty
    pub relative_humidity: Option<f64>,

    /// Battery voltage; `None` when the file has no battery column or the
    /// cell is empty
    pub battery: Option<f64>,
}

/// Column-wise view of a whole export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordColumns {
    pub timestamps: Vec<Timestamp>,
    pub temperatures: Vec<f64>,
    pub relative_humidity: Vec<Option<f64>>,
    pub battery: Vec<Option<f64>>,
}

impl RecordColumns {
    pub fn push(&mut self, record: Record) {
        self.timestamps.push(record.timestamp);
        self.temperatures.push(record.temperature);
        self.relative_humidity.push(record.relative_humidity);
        self.battery.push(record.battery);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

impl FromIterator<Record> for RecordColumns {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut columns = RecordColumns::default();
        for record in iter {
            columns.push(record);
        }
        columns
    }
}

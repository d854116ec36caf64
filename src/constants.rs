//! Application constants for the HOBO reader
//!
//! This module contains the default rule sets used to recognise HOBOware
//! exports: timestamp formats, header label patterns, and the column
//! classification table.

// =============================================================================
// Timestamp Formats
// =============================================================================

/// Default timestamp formats, tried in order.
///
/// Two-digit-year formats come first: chrono's `%Y` would happily accept
/// `17` as the year 0017.
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%y %I:%M:%S %p", // HOBOware export
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M", // Excel edit and save
    "%Y-%m-%d %H:%M:%S",
];

// =============================================================================
// Header Patterns
// =============================================================================

/// Serial number patterns; each must capture a `serial` group
pub const DEFAULT_SERIAL_PATTERNS: &[&str] = &[
    r"Serial Number:\s*(?P<serial>[A-Za-z0-9-]+)",
    r"LGR S/N:\s*(?P<serial>\d+)",
];

/// Title patterns; each must capture a `title` group.
///
/// The title ends at a following serial label or at end of line.
pub const DEFAULT_TITLE_PATTERNS: &[&str] =
    &[r"(?:Plot\s+)?Title:\s*(?P<title>.*?)\s*(?:Serial\s+Number:|LGR\s+S/N:|$)"];

/// UTC offset embedded in the timestamp column label, e.g. `GMT-08:00`
pub const UTC_OFFSET_PATTERN: &str =
    r"(?i)\b(?:GMT|UTC)\s*(?:(?P<sign>[+-])\s*(?P<hours>\d{1,2})(?::?(?P<minutes>\d{2}))?)?";

/// UTF-8 byte-order mark written by HOBOware on Windows
pub const UTF8_BOM: char = '\u{feff}';

// =============================================================================
// Column Classification
// =============================================================================

/// Logical field a data column carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Timestamp,
    RelativeHumidity,
    Battery,
    Temperature,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Timestamp => "timestamp",
            ColumnKind::RelativeHumidity => "relative humidity",
            ColumnKind::Battery => "battery",
            ColumnKind::Temperature => "temperature",
        }
    }
}

/// Label words that identify a column kind; every word must be present
pub struct ColumnRule {
    pub words: &'static [&'static str],
    pub kind: ColumnKind,
}

/// Column classification table, evaluated top to bottom.
///
/// Labels are lowercased and split on non-alphanumeric characters before
/// matching, so `"Temp, °F (LGR S/N: 10173910)"` yields `temp`, `f`, `lgr`, ...
pub const COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule {
        words: &["date", "time"],
        kind: ColumnKind::Timestamp,
    },
    ColumnRule {
        words: &["datetime"],
        kind: ColumnKind::Timestamp,
    },
    ColumnRule {
        words: &["timestamp"],
        kind: ColumnKind::Timestamp,
    },
    ColumnRule {
        words: &["rh"],
        kind: ColumnKind::RelativeHumidity,
    },
    ColumnRule {
        words: &["batt"],
        kind: ColumnKind::Battery,
    },
    ColumnRule {
        words: &["battery"],
        kind: ColumnKind::Battery,
    },
    ColumnRule {
        words: &["temp"],
        kind: ColumnKind::Temperature,
    },
    ColumnRule {
        words: &["temperature"],
        kind: ColumnKind::Temperature,
    },
];

/// Label words marking a Fahrenheit temperature column
pub const FAHRENHEIT_WORDS: &[&str] = &["f", "degf", "fahrenheit"];

/// Label words marking a Celsius temperature column
pub const CELSIUS_WORDS: &[&str] = &["c", "degc", "celsius"];

//! Individual data row parsing for HOBOware exports
//!
//! This module turns one CSV row into a [`Record`], or tells the reader to
//! skip it (footer lines, all-empty rows, logger event rows).

use chrono::FixedOffset;
use csv::StringRecord;

use super::column_mapping::ColumnLayout;
use super::field_parsers::{
    get_field, is_timestamp, parse_optional_number, parse_required_number, parse_timestamp,
};
use crate::app::models::Record;
use crate::config::ReaderRules;
use crate::constants::ColumnKind;
use crate::{Error, Result};

/// Why a row produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Every cell empty
    Blank,
    /// Single-cell line that is not a timestamp, e.g. a trailing comment
    Footer,
    /// Temperature cell empty; the row only logs a logger event
    EventOnly,
}

/// Outcome of parsing one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Record(Record),
    Skip(SkipReason),
}

/// Parse a single data row
pub fn parse_hobo_record(
    row: &StringRecord,
    layout: &ColumnLayout,
    rules: &ReaderRules,
    offset: Option<FixedOffset>,
    line: u64,
) -> Result<RowOutcome> {
    if row.iter().all(|field| field.trim().is_empty()) {
        return Ok(RowOutcome::Skip(SkipReason::Blank));
    }

    let required = layout.required_fields();

    // A lone timestamp is a data row cut short; any other single cell is a footer.
    if row.len() == 1 {
        let cell = row.get(0).unwrap_or("");
        if !is_timestamp(cell, &rules.timestamp_formats) {
            return Ok(RowOutcome::Skip(SkipReason::Footer));
        }
        return Err(Error::truncated_row(line, required, 1));
    }

    if row.len() < required {
        return Err(Error::truncated_row(line, required, row.len()));
    }

    if rules.skip_event_rows && get_field(row, layout.temperature).is_none() {
        return Ok(RowOutcome::Skip(SkipReason::EventOnly));
    }

    let timestamp = parse_timestamp(
        get_field(row, layout.timestamp).unwrap_or(""),
        line,
        &rules.timestamp_formats,
        offset,
        rules.target_offset,
    )?;
    let temperature = parse_required_number(row, layout.temperature, ColumnKind::Temperature, line)?;
    let relative_humidity =
        parse_optional_number(row, layout.relative_humidity, ColumnKind::RelativeHumidity, line)?;
    let battery = parse_optional_number(row, layout.battery, ColumnKind::Battery, line)?;

    Ok(RowOutcome::Record(Record {
        line,
        timestamp,
        temperature,
        unit: layout.unit,
        relative_humidity,
        battery,
    }))
}

//! Field parsing utilities for HOBOware records
//!
//! This module provides helper functions for parsing timestamps, UTC offsets
//! and measurement values from CSV records with proper error handling.

use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use csv::StringRecord;
use regex::Regex;
use std::sync::LazyLock;

use crate::app::models::Timestamp;
use crate::constants::ColumnKind;
use crate::{Error, Result};

static STANDALONE_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:GMT|UTC)?\s*(?:(?P<sign>[+-])?\s*(?P<hours>\d{1,2})(?::?(?P<minutes>\d{2}))?)?$",
    )
    .expect("offset pattern is valid")
});

/// Parse a UTC offset such as `GMT-07:00`, `UTC+0530`, `+05:30`, `-7` or `GMT`
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let captures = STANDALONE_OFFSET.captures(trimmed)?;
    offset_from_parts(
        captures.name("sign").map(|m| m.as_str()),
        captures.name("hours").map(|m| m.as_str()),
        captures.name("minutes").map(|m| m.as_str()),
    )
}

/// Build an offset from regex captures; a bare `GMT`/`UTC` is +00:00
pub fn offset_from_parts(
    sign: Option<&str>,
    hours: Option<&str>,
    minutes: Option<&str>,
) -> Option<FixedOffset> {
    let hours: i32 = match hours {
        Some(h) => h.parse().ok()?,
        None => 0,
    };
    let minutes: i32 = match minutes {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    let seconds = hours * 3600 + minutes * 60;
    match sign {
        Some("-") => FixedOffset::west_opt(seconds),
        _ => FixedOffset::east_opt(seconds),
    }
}

/// Parse a timestamp literal against `formats`, in order.
///
/// With a known `offset` the wall-clock value is pinned to it and then, when
/// `target` is given, converted to the target offset.
pub fn parse_timestamp(
    value: &str,
    line: u64,
    formats: &[String],
    offset: Option<FixedOffset>,
    target: Option<FixedOffset>,
) -> Result<Timestamp> {
    let trimmed = value.trim();
    let naive = parse_naive(trimmed, formats)
        .ok_or_else(|| Error::unparseable_timestamp(line, trimmed))?;

    let Some(offset) = offset else {
        return Ok(Timestamp::Local(naive));
    };

    let zoned = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| Error::unparseable_timestamp(line, trimmed))?;

    Ok(match target {
        Some(target) => Timestamp::Zoned(zoned.with_timezone(&target)),
        None => Timestamp::Zoned(zoned),
    })
}

/// Whether `value` matches any of the timestamp `formats`
pub fn is_timestamp(value: &str, formats: &[String]) -> bool {
    parse_naive(value.trim(), formats).is_some()
}

fn parse_naive(value: &str, formats: &[String]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Get a trimmed field value, `None` when absent or empty
pub fn get_field(record: &StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Parse a measurement that must be present
pub fn parse_required_number(
    record: &StringRecord,
    index: usize,
    kind: ColumnKind,
    line: u64,
) -> Result<f64> {
    let value = get_field(record, index).unwrap_or("");
    parse_number(value, kind, line)
}

/// Parse a measurement from an optional column.
///
/// Undetected columns and empty cells are `None`; a non-numeric value is
/// still an error.
pub fn parse_optional_number(
    record: &StringRecord,
    index: Option<usize>,
    kind: ColumnKind,
    line: u64,
) -> Result<Option<f64>> {
    match index.and_then(|i| get_field(record, i)) {
        Some(value) => parse_number(value, kind, line).map(Some),
        None => Ok(None),
    }
}

fn parse_number(value: &str, kind: ColumnKind, line: u64) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::unparseable_number(line, kind.as_str(), value))
}

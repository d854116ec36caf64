//! Column layout detection for HOBOware exports
//!
//! This module classifies the column-header row: which positions hold the
//! timestamp, temperature, relative humidity and battery voltage, which unit
//! the temperature is in, and which UTC offset the timestamps carry.

use chrono::FixedOffset;
use csv::StringRecord;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::field_parsers::offset_from_parts;
use crate::app::models::TemperatureUnit;
use crate::constants::{
    COLUMN_RULES, CELSIUS_WORDS, ColumnKind, FAHRENHEIT_WORDS, UTC_OFFSET_PATTERN,
};
use crate::{Error, Result};

static LABEL_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UTC_OFFSET_PATTERN).expect("offset pattern is valid"));

/// Positions of the logical fields within each data row
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Raw column labels, trimmed
    pub labels: Vec<String>,

    pub timestamp: usize,
    pub temperature: usize,
    pub relative_humidity: Option<usize>,
    pub battery: Option<usize>,

    /// Unit declared in the temperature label
    pub unit: TemperatureUnit,

    /// Offset declared in the timestamp label, e.g. `GMT-08:00`
    pub utc_offset: Option<FixedOffset>,
}

impl ColumnLayout {
    /// Classify the column-header row of `file`
    pub fn analyze(headers: &StringRecord, file: &str) -> Result<Self> {
        let labels: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut timestamp = None;
        let mut temperature = None;
        let mut relative_humidity = None;
        let mut battery = None;

        for (index, label) in labels.iter().enumerate() {
            let Some(kind) = classify_label(label) else {
                continue;
            };

            let slot = match kind {
                ColumnKind::Timestamp => &mut timestamp,
                ColumnKind::Temperature => &mut temperature,
                ColumnKind::RelativeHumidity => &mut relative_humidity,
                ColumnKind::Battery => &mut battery,
            };

            if slot.is_some() {
                warn!(
                    "Ignoring additional {} column {} ('{}') in {}",
                    kind.as_str(),
                    index,
                    label,
                    file
                );
            } else {
                *slot = Some(index);
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            Error::malformed_header(file, "no date/time column found in column header row")
        })?;
        let temperature = temperature.ok_or_else(|| {
            Error::malformed_header(file, "no temperature column found in column header row")
        })?;

        let unit = detect_unit(&labels[temperature]).ok_or_else(|| {
            Error::malformed_header(
                file,
                format!(
                    "temperature column '{}' does not declare °F or °C",
                    labels[temperature]
                ),
            )
        })?;

        let utc_offset = detect_utc_offset(&labels[timestamp]).map_err(|offset| {
            Error::malformed_header(
                file,
                format!("invalid UTC offset '{}' in timestamp column", offset),
            )
        })?;

        let layout = ColumnLayout {
            labels,
            timestamp,
            temperature,
            relative_humidity,
            battery,
            unit,
            utc_offset,
        };

        debug!(
            "Column layout for {}: timestamp={}, temperature={} ({}), rh={:?}, battery={:?}, offset={:?}",
            file,
            layout.timestamp,
            layout.temperature,
            layout.unit,
            layout.relative_humidity,
            layout.battery,
            layout.utc_offset
        );

        Ok(layout)
    }

    /// Get the index for a logical field
    pub fn get_index(&self, kind: ColumnKind) -> Option<usize> {
        match kind {
            ColumnKind::Timestamp => Some(self.timestamp),
            ColumnKind::Temperature => Some(self.temperature),
            ColumnKind::RelativeHumidity => self.relative_humidity,
            ColumnKind::Battery => self.battery,
        }
    }

    pub fn has_column(&self, kind: ColumnKind) -> bool {
        self.get_index(kind).is_some()
    }

    /// Minimum number of fields a data row needs to cover every detected column
    pub fn required_fields(&self) -> usize {
        [
            Some(self.timestamp),
            Some(self.temperature),
            self.relative_humidity,
            self.battery,
        ]
        .into_iter()
        .flatten()
        .max()
        .map_or(0, |max| max + 1)
    }
}

/// Lowercased alphanumeric words of a label
pub fn label_words(label: &str) -> Vec<String> {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Classify a label with the first matching rule
pub fn classify_label(label: &str) -> Option<ColumnKind> {
    let words = label_words(label);
    COLUMN_RULES
        .iter()
        .find(|rule| {
            rule.words
                .iter()
                .all(|word| words.iter().any(|w| w == word))
        })
        .map(|rule| rule.kind)
}

/// Temperature unit declared in a label (`°F`, `Temp C`, `degF`, ...)
pub fn detect_unit(label: &str) -> Option<TemperatureUnit> {
    label_words(label).iter().find_map(|word| {
        if FAHRENHEIT_WORDS.contains(&word.as_str()) {
            Some(TemperatureUnit::Fahrenheit)
        } else if CELSIUS_WORDS.contains(&word.as_str()) {
            Some(TemperatureUnit::Celsius)
        } else {
            None
        }
    })
}

/// UTC offset declared in a timestamp label.
///
/// `Ok(None)` when the label has no `GMT`/`UTC` marker; `Err` carries the
/// matched text when the marker is present but out of range.
pub fn detect_utc_offset(label: &str) -> std::result::Result<Option<FixedOffset>, String> {
    let Some(captures) = LABEL_OFFSET.captures(label) else {
        return Ok(None);
    };

    offset_from_parts(
        captures.name("sign").map(|m| m.as_str()),
        captures.name("hours").map(|m| m.as_str()),
        captures.name("minutes").map(|m| m.as_str()),
    )
    .map(Some)
    .ok_or_else(|| captures[0].to_string())
}

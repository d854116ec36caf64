//! Configuration management and validation.
//!
//! Provides the reader configuration: the extensible rule sets used to
//! recognise header labels and timestamp literals, timezone handling, and
//! event-row policy. `ReaderConfig` is the serialisable, user-facing form;
//! [`ReaderConfig::validate`] compiles it into [`ReaderRules`].

use crate::app::services::hobo_csv_reader::field_parsers::parse_utc_offset;
use crate::constants::{
    DEFAULT_SERIAL_PATTERNS, DEFAULT_TIMESTAMP_FORMATS, DEFAULT_TITLE_PATTERNS,
};
use crate::{Error, Result};
use chrono::FixedOffset;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// chrono `strftime` patterns for data-row timestamps, tried in order
    pub timestamp_formats: Vec<String>,

    /// Regexes locating the logger serial number (named group `serial`)
    pub serial_patterns: Vec<String>,

    /// Regexes locating the plot title (named group `title`)
    pub title_patterns: Vec<String>,

    /// Offset assumed when the timestamp label carries none (e.g. `GMT-07:00`)
    pub default_offset: Option<String>,

    /// Offset every timestamp is converted to
    pub target_offset: Option<String>,

    /// Skip rows whose temperature cell is empty (logger event rows)
    pub skip_event_rows: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            timestamp_formats: to_strings(DEFAULT_TIMESTAMP_FORMATS),
            serial_patterns: to_strings(DEFAULT_SERIAL_PATTERNS),
            title_patterns: to_strings(DEFAULT_TITLE_PATTERNS),
            default_offset: None,
            target_offset: None,
            skip_event_rows: true,
        }
    }
}

impl ReaderConfig {
    /// Set the offset timestamps are converted to
    pub fn with_target_offset(mut self, offset: impl Into<String>) -> Self {
        self.target_offset = Some(offset.into());
        self
    }

    /// Set the offset assumed for files without one in the header
    pub fn with_default_offset(mut self, offset: impl Into<String>) -> Self {
        self.default_offset = Some(offset.into());
        self
    }

    /// Keep or skip event-only rows
    pub fn with_skip_event_rows(mut self, skip: bool) -> Self {
        self.skip_event_rows = skip;
        self
    }

    /// Validate the configuration and compile its rule sets
    pub fn validate(&self) -> Result<ReaderRules> {
        if self.timestamp_formats.is_empty() {
            return Err(Error::configuration(
                "at least one timestamp format is required",
            ));
        }

        let serial_patterns = compile_patterns(&self.serial_patterns, "serial")?;
        let title_patterns = compile_patterns(&self.title_patterns, "title")?;

        let default_offset = self
            .default_offset
            .as_deref()
            .map(|s| parse_offset_setting("default_offset", s))
            .transpose()?;
        let target_offset = self
            .target_offset
            .as_deref()
            .map(|s| parse_offset_setting("target_offset", s))
            .transpose()?;

        debug!(
            "Validated reader config: {} timestamp formats, {} serial patterns, {} title patterns",
            self.timestamp_formats.len(),
            serial_patterns.len(),
            title_patterns.len()
        );

        Ok(ReaderRules {
            timestamp_formats: self.timestamp_formats.clone(),
            serial_patterns,
            title_patterns,
            default_offset,
            target_offset,
            skip_event_rows: self.skip_event_rows,
        })
    }
}

/// Compiled, ready-to-use form of [`ReaderConfig`]
#[derive(Debug, Clone)]
pub struct ReaderRules {
    pub timestamp_formats: Vec<String>,
    pub serial_patterns: Vec<Regex>,
    pub title_patterns: Vec<Regex>,
    pub default_offset: Option<FixedOffset>,
    pub target_offset: Option<FixedOffset>,
    pub skip_event_rows: bool,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn compile_patterns(patterns: &[String], group: &str) -> Result<Vec<Regex>> {
    if patterns.is_empty() {
        return Err(Error::configuration(format!(
            "at least one {} pattern is required",
            group
        )));
    }

    patterns
        .iter()
        .map(|pattern| {
            let regex = Regex::new(pattern).map_err(|e| {
                Error::configuration(format!("invalid {} pattern '{}': {}", group, pattern, e))
            })?;
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(Error::configuration(format!(
                    "{} pattern '{}' has no named group '{}'",
                    group, pattern, group
                )));
            }
            Ok(regex)
        })
        .collect()
}

fn parse_offset_setting(setting: &str, value: &str) -> Result<FixedOffset> {
    parse_utc_offset(value).ok_or_else(|| {
        Error::configuration(format!(
            "{}: '{}' is not a UTC offset (expected e.g. GMT-07:00, +05:30 or -7)",
            setting, value
        ))
    })
}

//! HOBOware header parsing and metadata extraction
//!
//! This module recovers the logger serial number and the plot title from the
//! lines preceding the data rows.

use regex::Regex;

use crate::config::ReaderRules;
use crate::constants::UTF8_BOM;
use crate::{Error, Result};

/// Metadata recovered from the export header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMetadata {
    /// Logger serial number
    pub serial_number: String,

    /// Plot title
    pub title: String,
}

impl HeaderMetadata {
    /// Parse the title line and the column-header line.
    ///
    /// The title comes from the title line only. The serial is looked up in
    /// the title line first and then in the column-header line, where
    /// HOBOware writes it as `LGR S/N: ...`.
    pub fn parse(
        title_line: &str,
        column_line: &str,
        rules: &ReaderRules,
        file: &str,
    ) -> Result<Self> {
        let title_line = clean_title_line(title_line);

        let title = first_capture(&rules.title_patterns, title_line, "title")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::malformed_header(
                    file,
                    format!("no plot title found in first line '{}'", title_line),
                )
            })?;

        let serial_number = first_capture(&rules.serial_patterns, title_line, "serial")
            .or_else(|| first_capture(&rules.serial_patterns, column_line, "serial"))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::malformed_header(file, "no logger serial number found"))?;

        Ok(HeaderMetadata {
            serial_number,
            title,
        })
    }
}

/// Strip the byte-order mark, surrounding quotes and trailing empty cells
pub fn clean_title_line(line: &str) -> &str {
    let line = line.trim_start_matches(UTF8_BOM).trim();
    let line = line.trim_end_matches(',').trim();
    line.strip_prefix('"')
        .and_then(|l| l.strip_suffix('"'))
        .unwrap_or(line)
        .trim()
}

fn first_capture(patterns: &[Regex], text: &str, group: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|c| c.name(group))
            .map(|m| m.as_str().trim().to_string())
    })
}

//! Core HOBOware CSV reader
//!
//! This module handles file opening, header consumption and the lazy,
//! forward-only iteration over data rows.

use chrono::FixedOffset;
use csv::StringRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::column_mapping::ColumnLayout;
use super::header::HeaderMetadata;
use super::record_parser::{RowOutcome, parse_hobo_record};
use super::stats::ReadStats;
use crate::app::models::{Record, RecordColumns, TemperatureUnit};
use crate::config::{ReaderConfig, ReaderRules};
use crate::constants::UTF8_BOM;
use crate::{Error, Result};

/// Reader over one HOBOware CSV export
///
/// Header and column layout are parsed on construction, so a file that is
/// not a recognisable export fails before any record is produced. Records
/// are then yielded one per data row through [`Iterator`]; a row that cannot
/// be parsed yields an `Err` carrying its line number and iteration may
/// continue past it.
///
/// The reader owns its file handle exclusively; dropping the reader (or
/// calling [`close`](Self::close)) releases it.
#[derive(Debug)]
pub struct HoboCsvReader<R: Read = File> {
    path: Option<PathBuf>,
    source: String,
    header: HeaderMetadata,
    layout: ColumnLayout,
    rules: ReaderRules,
    offset: Option<FixedOffset>,
    input: BufReader<R>,
    line_buf: Vec<u8>,
    /// Physical line most recently read (1-based)
    line_number: u64,
    stats: ReadStats,
    finished: bool,
}

impl HoboCsvReader<File> {
    /// Open an export with the default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, &ReaderConfig::default())
    }

    /// Open an export with a custom configuration
    pub fn open_with_config(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let rules = config.validate()?;

        info!("Opening HOBO export: {}", path.display());

        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::io(format!("Failed to open {}", path.display()), e)
            }
        })?;

        let mut reader = Self::with_rules(file, rules, path.display().to_string())?;
        reader.path = Some(path.to_path_buf());
        Ok(reader)
    }
}

impl<R: Read> HoboCsvReader<R> {
    /// Read an export from any byte source
    pub fn from_reader(reader: R, config: &ReaderConfig) -> Result<Self> {
        let rules = config.validate()?;
        Self::with_rules(reader, rules, "<reader>".to_string())
    }

    fn with_rules(reader: R, rules: ReaderRules, source: String) -> Result<Self> {
        let mut input = BufReader::new(reader);
        let mut line_offset = 0;

        let title_line = next_non_blank_line(&mut input, &mut line_offset, &source)?
            .ok_or_else(|| Error::malformed_header(&source, "file is empty"))?;
        let column_line = next_non_blank_line(&mut input, &mut line_offset, &source)?
            .ok_or_else(|| Error::malformed_header(&source, "no column header row found"))?;

        let header = HeaderMetadata::parse(&title_line, &column_line, &rules, &source)?;
        debug!(
            "Parsed header for {}: serial={}, title={}",
            source, header.serial_number, header.title
        );

        let columns = tokenize_line(&column_line).map_err(|e| {
            Error::csv(&source, "failed to tokenize column header row", Some(e))
        })?;
        let layout = ColumnLayout::analyze(&columns, &source)?;

        let offset = layout.utc_offset.or(rules.default_offset);
        if rules.target_offset.is_some() && offset.is_none() {
            return Err(Error::configuration(format!(
                "{}: cannot convert timestamps to a target offset, the file declares no UTC offset and no default is configured",
                source
            )));
        }

        Ok(Self {
            path: None,
            source,
            header,
            layout,
            rules,
            offset,
            input,
            line_buf: Vec::new(),
            line_number: line_offset,
            stats: ReadStats::new(),
            finished: false,
        })
    }

    /// Path of the export, when opened from a file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn header(&self) -> &HeaderMetadata {
        &self.header
    }

    pub fn serial_number(&self) -> &str {
        &self.header.serial_number
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Unit of every record's temperature
    pub fn unit(&self) -> TemperatureUnit {
        self.layout.unit
    }

    /// Offset the timestamps are read in (declared or configured default)
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }

    /// Release the underlying file handle
    pub fn close(self) {
        debug!("Closing HOBO export: {}", self.source);
    }

    /// Collect the remaining records column-wise, failing on the first row error
    pub fn into_columns(self) -> Result<RecordColumns> {
        self.collect()
    }

    fn finish(&mut self) {
        self.finished = true;
        info!(
            "Read {} records from {} ({} lines skipped, {} row errors)",
            self.stats.records_produced,
            self.source,
            self.stats.lines_skipped,
            self.stats.row_errors
        );
    }
}

impl<R: Read> Iterator for HoboCsvReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line_buf.clear();
            match self.input.read_until(b'\n', &mut self.line_buf) {
                Ok(0) => {
                    self.finish();
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    // Not a row failure; iteration stops here.
                    self.finished = true;
                    return Some(Err(Error::io(
                        format!(
                            "Failed to read line {} of {}",
                            self.line_number + 1,
                            self.source
                        ),
                        e,
                    )));
                }
            }
            self.line_number += 1;
            let line = self.line_number;

            let row = {
                let text = String::from_utf8_lossy(&self.line_buf);
                let text = text.trim_end_matches(['\r', '\n']);
                if text.trim().is_empty() {
                    continue;
                }
                tokenize_line(text)
            };
            self.stats.lines_read += 1;

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    self.stats.row_errors += 1;
                    return Some(Err(Error::csv(
                        &self.source,
                        format!("failed to tokenize line {}", line),
                        Some(e),
                    )));
                }
            };

            match parse_hobo_record(&row, &self.layout, &self.rules, self.offset, line) {
                Ok(RowOutcome::Record(record)) => {
                    self.stats.records_produced += 1;
                    return Some(Ok(record));
                }
                Ok(RowOutcome::Skip(reason)) => {
                    self.stats.lines_skipped += 1;
                    debug!("Skipped line {} of {}: {:?}", line, self.source, reason);
                }
                Err(e) => {
                    self.stats.row_errors += 1;
                    debug!("Row error in {}: {}", self.source, e);
                    return Some(Err(e));
                }
            }
        }
    }
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

fn tokenize_line(line: &str) -> std::result::Result<StringRecord, csv::Error> {
    let mut record = StringRecord::new();
    csv_builder()
        .from_reader(line.as_bytes())
        .read_record(&mut record)?;
    Ok(record)
}

/// Read the next line that is not blank, decoding lossily.
///
/// Header labels written by older HOBOware builds carry a Windows-1252 `°`.
fn next_non_blank_line<B: BufRead>(
    input: &mut B,
    line_offset: &mut u64,
    source: &str,
) -> Result<Option<String>> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io(format!("Failed to read header of {}", source), e))?;
        if read == 0 {
            return Ok(None);
        }
        *line_offset += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if !line.trim_start_matches(UTF8_BOM).trim().is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
}

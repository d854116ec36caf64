//! Reading statistics for HOBOware exports

use serde::{Deserialize, Serialize};

/// Counters maintained while iterating an export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadStats {
    /// Non-empty lines read after the column-header row
    pub lines_read: usize,

    /// Records successfully produced
    pub records_produced: usize,

    /// Footer, blank-cell and event-only lines skipped
    pub lines_skipped: usize,

    /// Lines that produced a row error (I/O failures are not counted)
    pub row_errors: usize,
}

impl ReadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records as a percentage of the data lines (skipped lines excluded)
    pub fn success_rate(&self) -> f64 {
        let data_lines = self.records_produced + self.row_errors;
        if data_lines == 0 {
            0.0
        } else {
            (self.records_produced as f64 / data_lines as f64) * 100.0
        }
    }

    pub fn has_errors(&self) -> bool {
        self.row_errors > 0
    }
}

//! Test utilities for HOBOware reader testing
//!
//! This module provides sample exports and helper functions used across the
//! different test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use super::HoboCsvReader;
use crate::config::ReaderConfig;

// Test modules
mod column_mapping_tests;

/// HOBOware export of a U23-001 (temperature + RH, event columns, no battery)
pub fn create_u23_export() -> &'static str {
    concat!(
        "\u{feff}Plot Title: Hobo U23-001 Sample Data\n",
        "\"#\",\"Date Time, GMT-08:00\",\"Temp, °F (LGR S/N: 10173910, SEN S/N: 10173910)\",",
        "\"RH, % (LGR S/N: 10173910, SEN S/N: 10173910)\",\"Coupler Detached (LGR S/N: 10173910)\",",
        "\"Host Connected (LGR S/N: 10173910)\",\"End Of File (LGR S/N: 10173910)\"\n",
        "1,01/13/17 01:00:00 AM,31.400,79.600,,,\n",
        "2,01/13/17 02:00:00 AM,30.950,81.200,,,\n",
        "3,01/13/17 02:15:32 AM,,,Logged,,\n",
        "4,01/13/17 03:00:00 AM,30.500,82.900,,,\n",
        "5,01/13/17 03:10:00 AM,,,,Logged,Logged\n",
    )
}

/// Plain export with every optional column present
pub fn create_simple_export() -> &'static str {
    r#""Serial Number: 10173910  Title: My Hobo Data"
Date Time GMT-08:00, Temp F, RH %, Batt V
01/13/17 01:00:00 AM,31.4,79.6,3.5"#
}

/// Export without RH or battery columns, Celsius, no UTC offset
pub fn create_temperature_only_export() -> &'static str {
    r#"Serial Number: 20001234  Title: Cave Entrance
Date Time, Temp C
01/13/17 01:00:00 AM,-1.25
01/13/17 02:00:00 AM,-1.50
01/13/17 03:00:00 AM,-1.75"#
}

/// Build a reader over in-memory content
pub fn reader_for(content: &str) -> crate::Result<HoboCsvReader<&[u8]>> {
    HoboCsvReader::from_reader(content.as_bytes(), &ReaderConfig::default())
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}

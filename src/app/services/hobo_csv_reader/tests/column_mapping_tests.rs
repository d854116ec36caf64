//! Tests for column classification, unit and offset detection

use chrono::FixedOffset;
use csv::StringRecord;

use super::super::column_mapping::{
    ColumnLayout, classify_label, detect_unit, detect_utc_offset, label_words,
};
use crate::Error;
use crate::app::models::TemperatureUnit;
use crate::constants::ColumnKind;

#[test]
fn test_label_words() {
    assert_eq!(
        label_words("Temp, °F (LGR S/N: 10173910)"),
        vec!["temp", "f", "lgr", "s", "n", "10173910"]
    );
    assert_eq!(label_words("High Res. Temp."), vec!["high", "res", "temp"]);
}

#[test]
fn test_classify_label() {
    assert_eq!(classify_label("Date Time, GMT-08:00"), Some(ColumnKind::Timestamp));
    assert_eq!(classify_label("Date Time GMT-08:00"), Some(ColumnKind::Timestamp));
    assert_eq!(classify_label("Temp, °F (LGR S/N: 1)"), Some(ColumnKind::Temperature));
    assert_eq!(classify_label("High Res. Temp. (°C)"), Some(ColumnKind::Temperature));
    assert_eq!(classify_label("RH, % (LGR S/N: 1)"), Some(ColumnKind::RelativeHumidity));
    assert_eq!(classify_label("RH %"), Some(ColumnKind::RelativeHumidity));
    assert_eq!(classify_label("Batt, V (LGR S/N: 1)"), Some(ColumnKind::Battery));
    assert_eq!(classify_label("Battery Voltage"), Some(ColumnKind::Battery));

    assert_eq!(classify_label("#"), None);
    assert_eq!(classify_label("Dew Point, °F"), None);
    assert_eq!(classify_label("Host Connected (LGR S/N: 1)"), None);
    assert_eq!(classify_label("Date"), None);
}

#[test]
fn test_detect_unit() {
    assert_eq!(detect_unit("Temp, °F"), Some(TemperatureUnit::Fahrenheit));
    assert_eq!(detect_unit("Temp F"), Some(TemperatureUnit::Fahrenheit));
    assert_eq!(detect_unit("Temp, °C (LGR S/N: 1)"), Some(TemperatureUnit::Celsius));
    assert_eq!(detect_unit("Temperature degC"), Some(TemperatureUnit::Celsius));
    // Windows-1252 degree sign decoded lossily
    assert_eq!(detect_unit("Temp, \u{fffd}F"), Some(TemperatureUnit::Fahrenheit));
    assert_eq!(detect_unit("Temp"), None);
}

#[test]
fn test_detect_utc_offset() {
    assert_eq!(
        detect_utc_offset("Date Time, GMT-08:00"),
        Ok(FixedOffset::west_opt(8 * 3600))
    );
    assert_eq!(
        detect_utc_offset("Date Time UTC+05:30"),
        Ok(FixedOffset::east_opt(5 * 3600 + 30 * 60))
    );
    assert_eq!(detect_utc_offset("Date Time, GMT"), Ok(FixedOffset::east_opt(0)));
    assert_eq!(detect_utc_offset("Date Time"), Ok(None));
    assert!(detect_utc_offset("Date Time, GMT+25:00").is_err());
}

#[test]
fn test_layout_hoboware_columns() {
    let headers = StringRecord::from(vec![
        "#",
        "Date Time, GMT-07:00",
        "Temp, °F (LGR S/N: 274341, SEN S/N: 274341)",
        "RH, % (LGR S/N: 274341, SEN S/N: 274341)",
        "Batt, V (LGR S/N: 274341, SEN S/N: 274341)",
    ]);

    let layout = ColumnLayout::analyze(&headers, "test.csv").unwrap();

    assert_eq!(layout.timestamp, 1);
    assert_eq!(layout.temperature, 2);
    assert_eq!(layout.relative_humidity, Some(3));
    assert_eq!(layout.battery, Some(4));
    assert_eq!(layout.unit, TemperatureUnit::Fahrenheit);
    assert_eq!(layout.utc_offset, FixedOffset::west_opt(7 * 3600));
    assert_eq!(layout.required_fields(), 5);
    assert_eq!(layout.labels.len(), 5);
}

#[test]
fn test_layout_optional_columns_absent() {
    let headers = StringRecord::from(vec!["Date Time", " Temp C"]);
    let layout = ColumnLayout::analyze(&headers, "test.csv").unwrap();

    assert_eq!(layout.relative_humidity, None);
    assert_eq!(layout.battery, None);
    assert!(!layout.has_column(ColumnKind::RelativeHumidity));
    assert!(!layout.has_column(ColumnKind::Battery));
    assert!(layout.has_column(ColumnKind::Temperature));
    assert_eq!(layout.utc_offset, None);
    assert_eq!(layout.unit, TemperatureUnit::Celsius);
    assert_eq!(layout.required_fields(), 2);
}

#[test]
fn test_layout_first_duplicate_wins() {
    let headers = StringRecord::from(vec!["Date Time", "Temp, °C", "Temp, °F (ext)"]);
    let layout = ColumnLayout::analyze(&headers, "test.csv").unwrap();

    assert_eq!(layout.get_index(ColumnKind::Temperature), Some(1));
    assert_eq!(layout.unit, TemperatureUnit::Celsius);
    // The ignored duplicate does not widen the required row
    assert_eq!(layout.required_fields(), 2);
}

#[test]
fn test_layout_missing_mandatory_columns() {
    let no_temp = StringRecord::from(vec!["Date Time", "RH, %", "Batt, V"]);
    match ColumnLayout::analyze(&no_temp, "test.csv") {
        Err(Error::MalformedHeader { message, .. }) => assert!(message.contains("temperature")),
        other => panic!("expected MalformedHeader, got {:?}", other),
    }

    let no_time = StringRecord::from(vec!["#", "Temp, °F", "RH, %"]);
    match ColumnLayout::analyze(&no_time, "test.csv") {
        Err(Error::MalformedHeader { message, .. }) => assert!(message.contains("date/time")),
        other => panic!("expected MalformedHeader, got {:?}", other),
    }
}

#[test]
fn test_layout_requires_temperature_unit() {
    let headers = StringRecord::from(vec!["Date Time", "Temp"]);
    let result = ColumnLayout::analyze(&headers, "test.csv");
    assert!(matches!(result, Err(Error::MalformedHeader { .. })));
}

#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]
extern crate std;

use std::string::String;
use std::vec::Vec;

use chrono::DateTime;

use crate::tests::{init_logger, reference_instant};
use crate::{SunCalculator, SunTimeDefinition};

#[derive(Debug, serde::Deserialize)]
struct SunTimesRow {
    event: String,
    expected_rfc3339: String,
}

#[derive(Debug, serde::Deserialize)]
struct DefinitionRow {
    angle: f64,
    rise_name: String,
    set_name: String,
}

fn load_definition_rows() -> Vec<SunTimeDefinition> {
    let csv_path = "test_data/extra_definitions.csv";
    let mut rdr = csv::Reader::from_path(csv_path).expect("Failed to open CSV file");
    rdr.deserialize::<DefinitionRow>()
        .map(|row| {
            let row = row.expect("Failed to parse definition row");
            SunTimeDefinition::new(row.angle, row.rise_name, row.set_name)
        })
        .collect()
}

/// Default sun times for 2014-07-29 19:03:25 UTC at 31.783°N 35.233°E.
#[test]
fn test_sun_times_against_csv_data() {
    init_logger();
    let csv_path = "test_data/sun_times.csv";
    let mut rdr =
        csv::Reader::from_path(csv_path).unwrap_or_else(|e| std::panic!("Failed to open CSV file {}: {}", csv_path, e));

    let times = SunCalculator::new().get_times(&reference_instant(), 31.783, 35.233);

    let mut rows = 0;
    for (row_num, result) in rdr.deserialize().enumerate() {
        let record: SunTimesRow =
            result.unwrap_or_else(|e| std::panic!("Failed to parse CSV row {}: {}", row_num + 2, e));
        rows += 1;

        let expected = DateTime::parse_from_rfc3339(&record.expected_rfc3339).unwrap().to_utc();
        let actual = times
            .get(record.event.as_str())
            .copied()
            .flatten()
            .unwrap_or_else(|| std::panic!("{} missing from sun times", record.event));

        let diff_nanos = (actual - expected).num_nanoseconds().unwrap();
        assert_eq!(
            diff_nanos, 0,
            "{}: {} instead of {}",
            record.event,
            actual.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true),
            record.expected_rfc3339
        );
    }

    assert_eq!(rows, times.len());
}

#[test]
fn test_definitions_from_csv() {
    let extra = load_definition_rows();
    assert_eq!(extra.len(), 3);
    assert_eq!(extra[1], SunTimeDefinition::new(-4.0, "", "civilTwilightMidpoint"));

    let mut definitions = SunCalculator::default_definitions();
    definitions.extend(extra);
    let times = SunCalculator::with_definitions(definitions).get_times(&reference_instant(), 31.783, 35.233);

    // 14 defaults, one pair and two single sided events
    assert_eq!(times.len(), 18);
    assert!(times["blueHourEnd"].is_some());
    assert!(times["civilTwilightMidpoint"].is_some());
    assert!(times["morningLight"].is_some());
    assert!(!times.contains_key(""));
}

#[cfg(feature = "serde")]
#[test]
fn test_definitions_deserialize_directly() {
    let mut rdr = csv::Reader::from_path("test_data/extra_definitions.csv").expect("Failed to open CSV file");
    let direct: Vec<SunTimeDefinition> = rdr
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("Failed to deserialize definitions");
    assert_eq!(direct, load_definition_rows());
}

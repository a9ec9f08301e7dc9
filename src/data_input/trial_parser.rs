// src/data_input/trial_parser.rs

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::{
    HEADER_BASE_SPEED, HEADER_ERROR, HEADER_IAE, HEADER_ISE, HEADER_LEFT_SPEED,
    HEADER_RIGHT_SPEED, HEADER_TIME,
};
use crate::data_input::trial_data::{TrialRecord, TrialSample};
use crate::error::AnalysisError;

/// Columns every trial log must carry, in the order they are destructured below.
const REQUIRED_HEADERS: [&str; 6] = [
    HEADER_TIME,        // 0
    HEADER_ERROR,       // 1
    HEADER_LEFT_SPEED,  // 2
    HEADER_RIGHT_SPEED, // 3
    HEADER_IAE,         // 4
    HEADER_ISE,         // 5
];

/// Parses the trial CSV log into a `TrialRecord`.
///
/// Fails with `AnalysisError::InputNotFound` when the file does not exist, before
/// anything else is read. Any other problem (missing column, non-numeric value,
/// malformed CSV, no data rows) is returned as the matching `AnalysisError`.
pub fn parse_trial_file(input_file_path: &Path) -> Result<TrialRecord, AnalysisError> {
    let source_name = input_file_path.display().to_string();

    let file = File::open(input_file_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalysisError::InputNotFound(source_name.clone()),
        _ => AnalysisError::Io(e),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    // --- Header Index Mapping ---
    let header_record = reader.headers()?.clone();
    debug!("Headers found in CSV: {:?}", header_record);

    let required_indices = REQUIRED_HEADERS
        .iter()
        .map(|&name| {
            header_record
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
        })
        .collect::<Result<Vec<usize>, _>>()?;
    let base_speed_index = header_record.iter().position(|h| h == HEADER_BASE_SPEED);

    for (name, idx) in REQUIRED_HEADERS.iter().zip(&required_indices) {
        debug!("  '{name}': Found (column {idx})");
    }
    debug!(
        "  '{}': {} (Optional, plotted as target base speed)",
        HEADER_BASE_SPEED,
        if base_speed_index.is_some() { "Found" } else { "Not Found" }
    );

    // --- Data Reading ---
    let mut samples: Vec<TrialSample> = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = result?;
        // Row numbers count the header as row 1, like a spreadsheet view of the file.
        let row_number = row_index + 2;

        let mut values = [0.0_f64; REQUIRED_HEADERS.len()];
        for ((slot, &csv_idx), &name) in values
            .iter_mut()
            .zip(&required_indices)
            .zip(REQUIRED_HEADERS.iter())
        {
            *slot = parse_field(&record, csv_idx, name, row_number)?;
        }
        let [time, error, left_speed, right_speed, iae, ise] = values;

        let base_speed = match base_speed_index {
            Some(csv_idx) if !record.get(csv_idx).unwrap_or("").is_empty() => {
                Some(parse_field(&record, csv_idx, HEADER_BASE_SPEED, row_number)?)
            }
            _ => None,
        };

        samples.push(TrialSample {
            time,
            error,
            left_speed,
            right_speed,
            iae,
            ise,
            base_speed,
        });
    }

    debug!("Finished reading {} data rows.", samples.len());
    if samples.is_empty() {
        return Err(AnalysisError::EmptyTrial);
    }

    match estimate_sample_rate(&samples) {
        Some(rate) => debug!("Estimated Sample Rate: {rate:.2} Hz"),
        None => warn!("Could not determine sample rate (need >= 2 data points with distinct timestamps)."),
    }

    Ok(TrialRecord::new(source_name, samples, base_speed_index.is_some()))
}

fn parse_field(
    record: &StringRecord,
    csv_idx: usize,
    column: &str,
    row_number: usize,
) -> Result<f64, AnalysisError> {
    let raw = record.get(csv_idx).unwrap_or("");
    raw.parse::<f64>().map_err(|_| AnalysisError::InvalidValue {
        row: row_number,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Average sample rate in Hz from the positive time deltas between consecutive rows.
pub fn estimate_sample_rate(samples: &[TrialSample]) -> Option<f64> {
    let mut total_delta = 0.0;
    let mut count = 0;
    for pair in samples.windows(2) {
        let delta = pair[1].time - pair[0].time;
        if delta > 1e-9 {
            total_delta += delta;
            count += 1;
        }
    }
    if count > 0 {
        Some(count as f64 / total_delta)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_parses_required_columns_in_any_order() {
        let file = write_csv(
            "Error,Time,ISE,IAE,RightSpeed,LeftSpeed\n\
             -4,0.000,0.00,0.00,5.9,5.7\n\
             12,0.032,4.61,0.51,5.6,6.0\n",
        );
        let record = parse_trial_file(file.path()).expect("parse");
        assert_eq!(record.len(), 2);
        assert!(!record.base_speed_found);
        assert_eq!(
            record.samples[1],
            TrialSample {
                time: 0.032,
                error: 12.0,
                left_speed: 6.0,
                right_speed: 5.6,
                iae: 0.51,
                ise: 4.61,
                base_speed: None,
            }
        );
    }

    #[test]
    fn test_trims_whitespace_and_reads_base_speed() {
        let file = write_csv(
            "Time, Error, LeftSpeed, RightSpeed, IAE, ISE, baseSpeed\n\
             0.0, 1, 5.8, 5.8, 0.0, 0.0, 5.8\n\
             0.5, 2, 5.9, 5.7, 0.5, 1.0,\n",
        );
        let record = parse_trial_file(file.path()).expect("parse");
        assert!(record.base_speed_found);
        assert_eq!(record.samples[0].base_speed, Some(5.8));
        assert_eq!(record.samples[1].base_speed, None);
    }

    #[test]
    fn test_missing_file_reports_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent_trial.csv");
        match parse_trial_file(&path) {
            Err(AnalysisError::InputNotFound(name)) => assert_eq!(name, path.display().to_string()),
            other => panic!("expected InputNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_csv("Time,Error,LeftSpeed,RightSpeed,IAE\n0,0,1,1,0\n");
        match parse_trial_file(file.path()) {
            Err(AnalysisError::MissingColumn(name)) => assert_eq!(name, "ISE"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let file = write_csv("Time,Error,LeftSpeed,RightSpeed,IAE,ISE\n0,0,1,1,0,0\n1,abc,1,1,0,0\n");
        match parse_trial_file(file.path()) {
            Err(AnalysisError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 3);
                assert_eq!(column, "Error");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_required_cell_is_rejected() {
        let file = write_csv("Time,Error,LeftSpeed,RightSpeed,IAE,ISE
0,0,1,1,0,0
0.032,,1,1,0,0
");
        match parse_trial_file(file.path()) {
            Err(AnalysisError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 3);
                assert_eq!(column, "Error");
                assert!(value.is_empty());
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty_trial() {
        let file = write_csv("Time,Error,LeftSpeed,RightSpeed,IAE,ISE\n");
        assert!(matches!(parse_trial_file(file.path()), Err(AnalysisError::EmptyTrial)));
    }

    #[test]
    fn test_estimate_sample_rate() {
        let samples: Vec<TrialSample> = [0.0, 0.032, 0.064, 0.064, 0.096]
            .iter()
            .map(|&time| TrialSample { time, ..Default::default() })
            .collect();
        let rate = estimate_sample_rate(&samples).expect("rate");
        assert!((rate - 31.25).abs() < 1e-9);
        assert!(estimate_sample_rate(&samples[..1]).is_none());
    }
}

// src/data_input/trial_parser.rs

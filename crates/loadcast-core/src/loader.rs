//! CSV ingest for workload time series.
//!
//! Input files are headerless CSVs where column index 3 holds an
//! epoch-seconds timestamp and column index 4 holds the observed value.
//! All other columns are ignored. Any malformed row is a fatal error carrying
//! the file path and 1-based row number; there is no row-level recovery.

use std::path::Path;

use chrono::DateTime;

use crate::error::{LoadcastError, Result};
use crate::series::{Sample, TimeSeries};

/// Column index of the epoch-seconds timestamp field.
pub const TIMESTAMP_COLUMN: usize = 3;

/// Column index of the observed value field.
pub const VALUE_COLUMN: usize = 4;

/// Minimum number of columns a row must have.
const MIN_COLUMNS: usize = VALUE_COLUMN + 1;

/// Loads one workload's time series from a CSV file.
///
/// Returns exactly one sample per input row, preserving row order. Rows with
/// fewer than five columns, a non-numeric value, or an unparsable timestamp
/// abort the load.
pub fn load_workload(path: &Path) -> Result<TimeSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadcastError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut samples = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 1;
        let record = record.map_err(|source| LoadcastError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        if record.len() < MIN_COLUMNS {
            return Err(LoadcastError::MissingColumns {
                path: path.to_path_buf(),
                line,
                expected: MIN_COLUMNS,
                found: record.len(),
            });
        }

        let raw_timestamp = &record[TIMESTAMP_COLUMN];
        let timestamp = parse_epoch_seconds(raw_timestamp).ok_or_else(|| {
            LoadcastError::InvalidTimestamp {
                path: path.to_path_buf(),
                line,
                raw: raw_timestamp.to_string(),
            }
        })?;

        let raw_value = &record[VALUE_COLUMN];
        let value: f64 = raw_value.parse().map_err(|_| LoadcastError::InvalidValue {
            path: path.to_path_buf(),
            line,
            raw: raw_value.to_string(),
        })?;

        samples.push(Sample::new(timestamp, value));
    }

    Ok(TimeSeries::new(samples))
}

/// Parses an epoch-seconds field, accepting fractional seconds.
fn parse_epoch_seconds(raw: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let seconds: f64 = raw.parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.trunc() as i64;
    let nanos = (seconds.fract().abs() * 1e9) as u32;
    DateTime::from_timestamp(whole, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_preserves_row_count_and_order() {
        let tmp = tempdir().unwrap();
        let path = write_csv(
            tmp.path(),
            "web.csv",
            "m,host,cpu,1700000000,1.5\n\
             m,host,cpu,1700000030,2.5\n\
             m,host,cpu,1700000060,3.5\n",
        );

        let series = load_workload(&path).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.values(), vec![1.5, 2.5, 3.5]);
        assert_eq!(series.samples[0].timestamp.timestamp(), 1_700_000_000);
        assert_eq!(series.samples[2].timestamp.timestamp(), 1_700_000_060);
    }

    #[test]
    fn test_load_accepts_fractional_timestamps() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "w.csv", "a,b,c,1700000000.5,4.0\n");

        let series = load_workload(&path).unwrap();
        assert_eq!(series.samples[0].timestamp.timestamp(), 1_700_000_000);
        assert_eq!(series.samples[0].timestamp.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_load_rejects_short_rows() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "w.csv", "a,b,c,1700000000,1.0\na,b\n");

        let err = load_workload(&path).unwrap_err();
        match err {
            LoadcastError::MissingColumns { line, expected, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 5);
                assert_eq!(found, 2);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_bad_timestamp() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "w.csv", "a,b,c,yesterday,1.0\n");

        let err = load_workload(&path).unwrap_err();
        match err {
            LoadcastError::InvalidTimestamp { line, raw, .. } => {
                assert_eq!(line, 1);
                assert_eq!(raw, "yesterday");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_bad_value() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "w.csv", "a,b,c,1700000000,high\n");

        let err = load_workload(&path).unwrap_err();
        match err {
            LoadcastError::InvalidValue { line, raw, .. } => {
                assert_eq!(line, 1);
                assert_eq!(raw, "high");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "w.csv", "");

        let series = load_workload(&path).unwrap();
        assert!(series.is_empty());
    }
}

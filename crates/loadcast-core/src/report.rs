//! Accuracy report accumulation.
//!
//! One `accuracy_metrics.csv` per batch run, overwritten each time: a header
//! row followed by one record per processed workload, in processing order.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoadcastError, Result};
use crate::metrics::AccuracyMetrics;

/// The report header, in column order.
pub const REPORT_HEADER: [&str; 4] = ["Workload", "MAE", "MSE", "RMSE"];

/// One row of the accuracy report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyRecord {
    /// The workload name (input file stem).
    pub workload: String,
    /// Mean absolute error percentage.
    pub mae: f64,
    /// Mean squared error percentage.
    pub mse: f64,
    /// Root mean squared error percentage.
    pub rmse: f64,
}

impl AccuracyRecord {
    /// Creates a record from a workload name and its scored metrics.
    pub fn new(workload: impl Into<String>, metrics: AccuracyMetrics) -> Self {
        Self {
            workload: workload.into(),
            mae: metrics.mae_pct,
            mse: metrics.mse_pct,
            rmse: metrics.rmse_pct,
        }
    }

    /// Renders the one-line batch log summary for this workload.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: MAE={:.2}, MSE={:.2}, RMSE={:.2}",
            self.workload, self.mae, self.mse, self.rmse
        )
    }
}

/// Writes the accuracy report incrementally.
///
/// The header is written at creation time, so an empty batch still produces a
/// header-only file.
pub struct ReportWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl ReportWriter {
    /// Creates (or truncates) the report file and writes the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let csv_err = |source| LoadcastError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(csv_err)?;
        writer.write_record(REPORT_HEADER).map_err(csv_err)?;
        writer.flush().map_err(|source| LoadcastError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    /// Appends one workload's record.
    pub fn append(&mut self, record: &AccuracyRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .map_err(|source| LoadcastError::Csv {
                path: self.path.clone(),
                source,
            })
    }

    /// Flushes and closes the report.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(|source| LoadcastError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Returns the report path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

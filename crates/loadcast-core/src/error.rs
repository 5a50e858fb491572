//! Error types for the loadcast core library.
//!
//! This module defines the error type used throughout the loadcast-core crate,
//! providing structured error handling with detailed context.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for loadcast-core operations.
#[derive(Debug, Error)]
pub enum LoadcastError {
    /// Error when a file or directory cannot be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that was being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Error raised by the CSV reader or writer.
    #[error("CSV error at {path}: {source}")]
    Csv {
        /// The path that was being read or written.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Error when an input row has too few columns.
    #[error("{path}:{line}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        /// The input file containing the short row.
        path: PathBuf,
        /// The 1-based row number.
        line: usize,
        /// The minimum column count required.
        expected: usize,
        /// The column count actually present.
        found: usize,
    },

    /// Error when the timestamp column cannot be parsed as epoch seconds.
    #[error("{path}:{line}: invalid timestamp '{raw}'")]
    InvalidTimestamp {
        /// The input file containing the bad row.
        path: PathBuf,
        /// The 1-based row number.
        line: usize,
        /// The raw field contents.
        raw: String,
    },

    /// Error when the value column cannot be parsed as a number.
    #[error("{path}:{line}: invalid value '{raw}'")]
    InvalidValue {
        /// The input file containing the bad row.
        path: PathBuf,
        /// The 1-based row number.
        line: usize,
        /// The raw field contents.
        raw: String,
    },

    /// Error when a workload has too few samples to fit a model.
    #[error("too few training samples to fit a model: {len} (minimum {min})")]
    InsufficientData {
        /// The number of training samples available.
        len: usize,
        /// The minimum number of training samples required.
        min: usize,
    },

    /// Error when the train/validation split leaves nothing to validate against.
    #[error("workload '{workload}' produced an empty validation split")]
    EmptyValidation {
        /// The workload being processed.
        workload: String,
    },

    /// Error when the validation peak is zero, which makes the percentage
    /// metrics non-finite.
    #[error("workload '{workload}' has a zero validation peak; percentage metrics are undefined")]
    ZeroPeak {
        /// The workload being scored.
        workload: String,
    },

    /// Error raised by the forecasting backend during fit or predict.
    #[error("forecast model error: {message}")]
    Forecast {
        /// A description of the model error.
        message: String,
    },

    /// Error raised while rendering a chart.
    #[error("plot rendering failed for '{workload}': {message}")]
    Plot {
        /// The workload being plotted.
        workload: String,
        /// A description of the rendering error.
        message: String,
    },

    /// Error during configuration parsing or validation.
    #[error("configuration error: {message}")]
    Config {
        /// A description of the configuration error.
        message: String,
    },
}

/// A specialized Result type for loadcast-core operations.
pub type Result<T> = std::result::Result<T, LoadcastError>;

//! Batch CPU-usage forecasting and accuracy evaluation for loadcast.
//!
//! This crate implements the full pipeline behind the `loadcast` CLI: for
//! each workload CSV in an input directory it parses the (timestamp, value)
//! series, splits it 75/25 into training and validation, fits a forecasting
//! backend on the training split only, predicts a horizon equal to the
//! validation length at a fixed 30-second cadence, renders an
//! observed-vs-predicted chart, scores the forecast, and appends one row to
//! the batch accuracy report.
//!
//! # Modules
//!
//! - [`series`] - Time series data model and the deterministic split
//! - [`loader`] - CSV ingest for workload files
//! - [`forecast`] - The [`Forecaster`] trait seam and its backends
//! - [`metrics`] - Percentage-normalized MAE/MSE/RMSE scoring
//! - [`plot`] - Chart rendering
//! - [`report`] - Accuracy report accumulation
//! - [`pipeline`] - The batch driver and its configuration
//! - [`error`] - The crate error type
//!
//! # Example
//!
//! ```no_run
//! use loadcast_core::{run_batch, EtsForecaster, PipelineConfig};
//!
//! let config = PipelineConfig {
//!     input_dir: "workloads".into(),
//!     ..PipelineConfig::default()
//! };
//! let summary = run_batch(&config, &EtsForecaster)?;
//! println!("scored {} workloads", summary.processed);
//! # Ok::<(), loadcast_core::LoadcastError>(())
//! ```

pub mod error;
pub mod forecast;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod series;

pub use error::{LoadcastError, Result};
pub use forecast::{EtsForecaster, Forecast, Forecaster, FittedForecast, NaiveForecaster};
pub use loader::load_workload;
pub use metrics::{score, AccuracyMetrics};
pub use pipeline::{run_batch, BatchSummary, PipelineConfig};
pub use report::{AccuracyRecord, ReportWriter};
pub use series::{Sample, TimeSeries, TrainValidationSplit, TRAIN_RATIO};

//! Batch driver: iterate a directory of workload CSVs and run the
//! load → split → fit → predict → plot → score pipeline for each.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LoadcastError, Result};
use crate::forecast::Forecaster;
use crate::loader::load_workload;
use crate::metrics::score;
use crate::plot::render_forecast_plot;
use crate::report::{AccuracyRecord, ReportWriter};
use crate::series::TRAIN_RATIO;

/// Settings for one batch run.
///
/// Serde-derived so a JSON config file can carry the same fields as the CLI;
/// [`PipelineConfig::merge_overrides`] reconciles the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory containing the input `.csv` workloads.
    pub input_dir: PathBuf,
    /// Path of the accuracy report, overwritten each run.
    pub report_path: PathBuf,
    /// Directory for the per-workload chart images, created if absent.
    pub plots_dir: PathBuf,
    /// Hand each written chart to the platform image viewer.
    pub show_interactive: bool,
    /// Isolate per-workload failures instead of aborting the batch.
    pub keep_going: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            report_path: PathBuf::from("accuracy_metrics.csv"),
            plots_dir: PathBuf::from("plots"),
            show_interactive: false,
            keep_going: false,
        }
    }
}

impl PipelineConfig {
    /// Loads a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| LoadcastError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|e| LoadcastError::Config {
            message: format!("invalid config file {}: {e}", path.display()),
        })
    }

    /// Merges this config over an optional base while preserving explicit
    /// overrides.
    ///
    /// Merge rule:
    /// - update a field only if this value differs from `PipelineConfig::default()`
    /// - and also differs from the current base value.
    pub fn merge_overrides(&self, base: Option<PipelineConfig>) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        let mut conf = base.unwrap_or_default();

        macro_rules! merge_field {
            ($field:ident) => {
                if self.$field != defaults.$field && self.$field != conf.$field {
                    conf.$field = self.$field.clone();
                }
            };
        }

        merge_field!(input_dir);
        merge_field!(report_path);
        merge_field!(plots_dir);
        merge_field!(show_interactive);
        merge_field!(keep_going);

        conf
    }
}

/// Counts for one completed batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Workloads scored and written to the report.
    pub processed: usize,
    /// Workloads that failed (only non-zero with `keep_going`).
    pub failed: usize,
}

/// Runs the full batch over every `.csv` file in the input directory.
///
/// Files are visited in filesystem order (not sorted); entries without a
/// `.csv` extension are skipped. The plots directory is created idempotently
/// before the loop. With `keep_going` unset, the first workload failure
/// aborts the batch; otherwise failures are logged and skipped, and the
/// report contains only the successful workloads.
pub fn run_batch(config: &PipelineConfig, forecaster: &dyn Forecaster) -> Result<BatchSummary> {
    fs::create_dir_all(&config.plots_dir).map_err(|source| LoadcastError::Io {
        path: config.plots_dir.clone(),
        source,
    })?;

    let mut report = ReportWriter::create(&config.report_path)?;
    let mut summary = BatchSummary::default();

    let entries = fs::read_dir(&config.input_dir).map_err(|source| LoadcastError::Io {
        path: config.input_dir.clone(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LoadcastError::Io {
            path: config.input_dir.clone(),
            source,
        })?;
        let path = entry.path();
        if path.extension() != Some(OsStr::new("csv")) || !path.is_file() {
            continue;
        }
        let Some(workload) = path.file_stem().and_then(OsStr::to_str) else {
            warn!(path = %path.display(), "skipping file with non-UTF-8 name");
            continue;
        };
        let workload = workload.to_string();

        match process_workload(&path, &workload, config, forecaster) {
            Ok(record) => {
                info!("{}", record.summary());
                report.append(&record)?;
                summary.processed += 1;
            }
            Err(err) if config.keep_going => {
                warn!(workload = %workload, "skipping failed workload: {err}");
                summary.failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    report.finish()?;
    info!(
        processed = summary.processed,
        failed = summary.failed,
        report = %config.report_path.display(),
        "batch complete"
    );
    Ok(summary)
}

/// Runs one workload through the pipeline and returns its report record.
fn process_workload(
    path: &Path,
    workload: &str,
    config: &PipelineConfig,
    forecaster: &dyn Forecaster,
) -> Result<AccuracyRecord> {
    let series = load_workload(path)?;
    let split = series.split(TRAIN_RATIO);
    if split.validation.is_empty() {
        return Err(LoadcastError::EmptyValidation {
            workload: workload.to_string(),
        });
    }

    let fitted = forecaster.fit(&split.training)?;
    let forecast = fitted.predict(split.validation.len())?;
    if forecast.horizon < split.validation.len() {
        return Err(LoadcastError::Forecast {
            message: format!(
                "backend produced {} future steps, needed {}",
                forecast.horizon,
                split.validation.len()
            ),
        });
    }

    let plot_path = config.plots_dir.join(format!("{workload}.png"));
    render_forecast_plot(
        workload,
        &series,
        &forecast.samples,
        &plot_path,
        config.show_interactive,
    )?;

    let actual = split.validation_values();
    let predicted: Vec<f64> = forecast
        .horizon_values()
        .into_iter()
        .take(actual.len())
        .collect();
    let metrics = score(workload, &actual, &predicted)?;

    Ok(AccuracyRecord::new(workload, metrics))
}

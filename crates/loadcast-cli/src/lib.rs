//! Loadcast CLI Library
//!
//! This crate provides the command-line interface for loadcast: batch
//! forecasting of per-workload CPU-usage time series with accuracy reporting.
//!
//! # Example
//!
//! ```bash
//! # Score every workload CSV in a directory
//! loadcast data/workloads
//!
//! # Headless run with the naive baseline and per-file error isolation
//! loadcast data/workloads --model naive --keep-going
//!
//! # Load defaults from a JSON config, overriding the report path
//! loadcast data/workloads --config batch.json --report out/metrics.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use loadcast_core::{run_batch, EtsForecaster, Forecaster, NaiveForecaster, PipelineConfig};

/// Loadcast - batch CPU-usage forecasting and accuracy evaluation
///
/// Processes every `.csv` workload in FOLDER: fits a forecasting model on the
/// earliest 75% of each series, predicts the remaining 25%, writes an
/// observed-vs-predicted chart per workload, and accumulates MAE/MSE/RMSE
/// percentages into a single report.
#[derive(Parser, Debug, Clone)]
#[command(name = "loadcast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the input `.csv` workload files
    pub folder: PathBuf,

    /// Path of the accuracy report (overwritten each run)
    #[arg(long, env = "LOADCAST_REPORT", default_value = "accuracy_metrics.csv")]
    pub report: PathBuf,

    /// Directory for the per-workload chart images (created if absent)
    #[arg(long, env = "LOADCAST_PLOTS_DIR", default_value = "plots")]
    pub plots_dir: PathBuf,

    /// Forecasting backend to use
    #[arg(long, value_enum, default_value = "ets")]
    pub model: ModelBackend,

    /// Open each written chart in the platform image viewer
    #[arg(long, default_value = "false")]
    pub show: bool,

    /// Continue past per-workload failures instead of aborting the batch
    #[arg(long, default_value = "false")]
    pub keep_going: bool,

    /// Path to a JSON config file; explicit CLI flags take precedence
    #[arg(long, short = 'c', env = "LOADCAST_CONFIG_PATH")]
    pub config: Option<PathBuf>,
}

/// Available forecasting backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelBackend {
    /// Automatic exponential-smoothing model selection (default)
    Ets,
    /// Last-observation-carried-forward baseline
    Naive,
}

impl Cli {
    /// Resolves the effective pipeline configuration, merging an optional
    /// config file under the CLI flags.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let base = match &self.config {
            Some(path) => Some(
                PipelineConfig::from_file(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
            ),
            None => None,
        };

        let overrides = PipelineConfig {
            input_dir: self.folder.clone(),
            report_path: self.report.clone(),
            plots_dir: self.plots_dir.clone(),
            show_interactive: self.show,
            keep_going: self.keep_going,
        };
        Ok(overrides.merge_overrides(base))
    }

    /// Returns the selected forecasting backend.
    pub fn forecaster(&self) -> Box<dyn Forecaster> {
        match self.model {
            ModelBackend::Ets => Box::new(EtsForecaster),
            ModelBackend::Naive => Box::new(NaiveForecaster),
        }
    }

    /// Executes the batch run.
    pub fn run(&self) -> Result<()> {
        let config = self.pipeline_config()?;
        let forecaster = self.forecaster();

        info!(
            input_dir = %config.input_dir.display(),
            model = forecaster.name(),
            "starting batch"
        );

        let summary = run_batch(&config, forecaster.as_ref())
            .with_context(|| format!("batch failed over {}", config.input_dir.display()))?;

        info!(
            processed = summary.processed,
            failed = summary.failed,
            "wrote {}",
            config.report_path.display()
        );
        Ok(())
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_single_positional_argument() {
        let cli = Cli::try_parse_from(["loadcast", "data/workloads"]).unwrap();
        assert_eq!(cli.folder, PathBuf::from("data/workloads"));
        assert_eq!(cli.report, PathBuf::from("accuracy_metrics.csv"));
        assert_eq!(cli.plots_dir, PathBuf::from("plots"));
        assert_eq!(cli.model, ModelBackend::Ets);
        assert!(!cli.show);
        assert!(!cli.keep_going);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_requires_the_folder_argument() {
        assert!(Cli::try_parse_from(["loadcast"]).is_err());
    }

    #[test]
    fn test_cli_model_selection() {
        let cli = Cli::try_parse_from(["loadcast", "data", "--model", "naive"]).unwrap();
        assert_eq!(cli.model, ModelBackend::Naive);
        assert_eq!(cli.forecaster().name(), "naive");
    }

    #[test]
    fn test_cli_verifies() {
        Cli::command().debug_assert();
    }
}

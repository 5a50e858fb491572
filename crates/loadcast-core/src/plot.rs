//! Chart rendering for observed-vs-predicted series.
//!
//! One PNG per workload: the full observed series and the full predicted
//! series overlaid as two line plots. Dimensions match the original report
//! output (1600×1200 at 1.5× scale).

use std::path::Path;
use std::process::Command;

use plotters::prelude::*;
use tracing::{debug, warn};

use crate::error::{LoadcastError, Result};
use crate::series::{Sample, TimeSeries};

/// Output image width in pixels.
pub const PLOT_WIDTH: u32 = 2400;

/// Output image height in pixels.
pub const PLOT_HEIGHT: u32 = 1800;

/// Renders the observed and predicted series for one workload to `path`.
///
/// When `show_interactive` is set the written image is additionally handed to
/// the platform opener; failures to launch a viewer are logged, not fatal, so
/// headless batch runs stay unaffected.
pub fn render_forecast_plot(
    workload: &str,
    observed: &TimeSeries,
    predicted: &[Sample],
    path: &Path,
    show_interactive: bool,
) -> Result<()> {
    if observed.is_empty() && predicted.is_empty() {
        return Err(LoadcastError::Plot {
            workload: workload.to_string(),
            message: "nothing to plot".to_string(),
        });
    }

    let plot_err = |message: String| LoadcastError::Plot {
        workload: workload.to_string(),
        message,
    };

    let all_samples = || observed.samples.iter().chain(predicted.iter());
    let x_min = all_samples()
        .map(|s| s.timestamp)
        .min()
        .ok_or_else(|| plot_err("no timestamps".to_string()))?;
    let mut x_max = all_samples()
        .map(|s| s.timestamp)
        .max()
        .ok_or_else(|| plot_err("no timestamps".to_string()))?;
    if x_min == x_max {
        x_max = x_max + chrono::Duration::seconds(1);
    }
    let y_min = all_samples().map(|s| s.value).fold(f64::INFINITY, f64::min);
    let y_max = all_samples()
        .map(|s| s.value)
        .fold(f64::NEG_INFINITY, f64::max);

    // Pad the value axis so flat series still render with visible lines.
    let y_pad = if (y_max - y_min).abs() < f64::EPSILON {
        1.0
    } else {
        (y_max - y_min) * 0.05
    };

    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| plot_err(e.to_string()))?;

    let title = format!("Prophet Model Forecast vs Observed - {workload}");
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 48))
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, (y_min - y_pad)..(y_max + y_pad))
        .map_err(|e| plot_err(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Timestamp")
        .y_desc("CPU Usage")
        .x_label_formatter(&|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .draw()
        .map_err(|e| plot_err(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            observed.samples.iter().map(|s| (s.timestamp, s.value)),
            &BLUE,
        ))
        .map_err(|e| plot_err(e.to_string()))?
        .label("Observed")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            predicted.iter().map(|s| (s.timestamp, s.value)),
            &RED,
        ))
        .map_err(|e| plot_err(e.to_string()))?
        .label("Predicted")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| plot_err(e.to_string()))?;

    root.present().map_err(|e| plot_err(e.to_string()))?;
    debug!(workload, path = %path.display(), "wrote forecast plot");

    if show_interactive {
        display_plot(path);
    }

    Ok(())
}

/// Hands a written image to the platform opener.
fn display_plot(path: &Path) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(all(unix, not(target_os = "macos")))]
    let opener = "xdg-open";

    if let Err(e) = Command::new(opener).arg(path).spawn() {
        warn!(path = %path.display(), "could not open image viewer: {e}");
    }
}

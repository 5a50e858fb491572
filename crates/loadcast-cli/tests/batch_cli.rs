//! CLI-level batch runs exercised through the library entry point.

use std::fs;
use std::path::Path;

use clap::Parser;
use loadcast_cli::{Cli, ModelBackend};
use tempfile::tempdir;

fn write_workload(dir: &Path, name: &str, values: &[f64]) {
    let mut contents = String::new();
    for (i, value) in values.iter().enumerate() {
        let ts = 1_700_000_000 + i as i64 * 30;
        contents.push_str(&format!("metric,host-1,cpu,{ts},{value}\n"));
    }
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_cli_run_writes_report_and_plot() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir(&data).unwrap();
    write_workload(&data, "web.csv", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

    let report = tmp.path().join("metrics.csv");
    let plots = tmp.path().join("plots");
    let cli = Cli::try_parse_from([
        "loadcast",
        data.to_str().unwrap(),
        "--model",
        "naive",
        "--report",
        report.to_str().unwrap(),
        "--plots-dir",
        plots.to_str().unwrap(),
    ])
    .unwrap();

    cli.run().unwrap();

    let contents = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Workload,MAE,MSE,RMSE");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("web,"));
    assert!(plots.join("web.png").exists());
}

#[test]
fn test_cli_config_file_merge_keeps_explicit_flags() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir(&data).unwrap();

    let config_path = tmp.path().join("batch.json");
    fs::write(
        &config_path,
        format!(
            r#"{{"plots_dir": "{}", "keep_going": true}}"#,
            tmp.path().join("file-plots").display()
        ),
    )
    .unwrap();

    let report = tmp.path().join("metrics.csv");
    let cli = Cli::try_parse_from([
        "loadcast",
        data.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--report",
        report.to_str().unwrap(),
    ])
    .unwrap();

    let config = cli.pipeline_config().unwrap();
    // From the file:
    assert!(config.keep_going);
    assert_eq!(config.plots_dir, tmp.path().join("file-plots"));
    // Explicit CLI flags win:
    assert_eq!(config.report_path, report);
    assert_eq!(config.input_dir, data);
}

#[test]
fn test_cli_missing_folder_fails_with_nonexistent_path() {
    let tmp = tempdir().unwrap();
    let report = tmp.path().join("metrics.csv");
    let plots = tmp.path().join("plots");
    let cli = Cli::try_parse_from([
        "loadcast",
        tmp.path().join("does-not-exist").to_str().unwrap(),
        "--report",
        report.to_str().unwrap(),
        "--plots-dir",
        plots.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(cli.model, ModelBackend::Ets);
    assert!(cli.run().is_err());
}

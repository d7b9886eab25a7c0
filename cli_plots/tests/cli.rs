//! バイナリとしての動作確認

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const OUTPUT_COLUMNS: usize = 58;
const INPUT_COLUMNS: usize = 24;

/// 年・dectime・QH・降水だけを埋めた出力行
fn output_line(year: i32, dectime: f64, qh: f64, precip: f64) -> String {
    let mut values = vec![0.0; OUTPUT_COLUMNS];
    values[0] = year as f64;
    values[4] = dectime;
    values[15] = qh;
    values[17] = precip;
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_output_table(dir: &Path, lines: &[String]) -> PathBuf {
    let path = dir.join("Kc_2011_60.txt");
    let mut text = String::from("%iy id it imin dectime ...\n");
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    fs::write(&path, text).unwrap();
    path
}

fn write_input_table(dir: &Path, rows: usize) -> PathBuf {
    let path = dir.join("Kc_2011_data_60.txt");
    let line = vec!["0"; INPUT_COLUMNS].join(" ");
    let text = vec![line; rows].join("\n");
    fs::write(&path, text).unwrap();
    path
}

fn command(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("suews_plot").unwrap();
    cmd.env("SUEWS_PLOT_CONFIG_DIR", config_dir.path())
        .env_remove("PLOT_OUTPUT_DIR")
        .env_remove("PLOT_SIZE")
        .env_remove("MONTH_LAYOUT");
    cmd
}

fn sample_output(dir: &Path) -> PathBuf {
    write_output_table(
        dir,
        &[
            output_line(2011, 59.0, 10.0, 1.0),
            output_line(2011, 60.5, 20.0, 2.0),
            output_line(2011, 90.0, 5.0, 3.0),
        ],
    )
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    command(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("basic"))
        .stdout(predicate::str::contains("monthly"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_summary_json() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());

    command(&dir)
        .args(["summary", "--format", "json"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"month\": 3"))
        .stdout(predicate::str::contains("\"qh\": 15.0"))
        .stdout(predicate::str::contains("\"month\": 4"));
}

#[test]
fn test_summary_calendar_layout_has_twelve_months() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());

    let assert = command(&dir)
        .args(["summary", "--layout", "calendar"])
        .arg(&output)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    // ヘッダ + 12 ヶ月
    assert_eq!(stdout.lines().count(), 13);
}

#[test]
fn test_summary_layout_from_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[monthly]\nlayout = \"calendar\"\n",
    )
    .unwrap();
    let output = sample_output(dir.path());

    command(&dir)
        .args(["summary", "--format", "json"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"month\": 12"));
}

#[test]
fn test_summary_rejects_short_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.txt");
    fs::write(&path, "2011 1 0 5 1.0\n").unwrap();

    command(&dir)
        .arg("summary")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 58"));
}

#[test]
fn test_basic_row_count_mismatch() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());
    let input = write_input_table(dir.path(), 2);

    command(&dir)
        .arg("basic")
        .arg(&output)
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("basic.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 rows but input table has 2"));
}

#[test]
fn test_monthly_row_count_mismatch() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());
    let input = write_input_table(dir.path(), 5);

    command(&dir)
        .arg("monthly")
        .arg(&output)
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("monthly.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 rows but input table has 5"));
}

#[test]
fn test_existing_plot_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());
    let input = write_input_table(dir.path(), 3);
    let target = dir.path().join("basic.png");
    fs::write(&target, b"keep").unwrap();

    command(&dir)
        .arg("basic")
        .arg(&output)
        .arg(&input)
        .arg("-o")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read(&target).unwrap(), b"keep");
}

#[test]
fn test_monthly_writes_svg() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());
    let input = write_input_table(dir.path(), 3);
    let target = dir.path().join("figures").join("monthly.svg");

    command(&dir)
        .arg("monthly")
        .arg(&output)
        .arg(&input)
        .arg("-o")
        .arg(&target)
        .arg("--size")
        .arg("800x400")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plot generated"));

    let svg = fs::read_to_string(&target).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Monthly water balance"));
}

#[test]
fn test_basic_force_overwrites_png() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());
    let input = write_input_table(dir.path(), 3);
    let target = dir.path().join("basic.png");
    fs::write(&target, b"old").unwrap();

    command(&dir)
        .arg("basic")
        .arg(&output)
        .arg(&input)
        .arg("-o")
        .arg(&target)
        .arg("--force")
        .assert()
        .success();

    assert!(fs::read(&target).unwrap().starts_with(b"\x89PNG"));
}

#[test]
fn test_missing_output_file() {
    let dir = TempDir::new().unwrap();

    command(&dir)
        .arg("monthly")
        .arg(dir.path().join("missing.txt"))
        .arg("-o")
        .arg(dir.path().join("monthly.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load output table"));
}

#[test]
fn test_invalid_size() {
    let dir = TempDir::new().unwrap();
    let output = sample_output(dir.path());

    command(&dir)
        .args(["monthly", "--size", "big"])
        .arg(&output)
        .arg("-o")
        .arg(dir.path().join("monthly.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid size format"));
}

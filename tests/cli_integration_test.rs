//! End-to-end tests for the `flopmap` binary.
//!
//! stdout is a pipe under the test harness, so the interactive chart is
//! always skipped; `--no-chart` is still passed where the test is about the
//! report alone.

use assert_cmd::Command;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn flopmap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flopmap").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().clone();
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_default_run_prints_exact_report() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(flopmap(&dir).args(["analyze", "--no-chart"]));
    assert_eq!(
        out,
        indoc! {"
            Complexity Breakdown:
            - Self Attention: 3246391296
            - Add & Norm 1: 2752512
            - FFN: 9665249280
            - Add & Norm 2: 2752512

            Total Complexity: 12917145600
        "}
    );
}

#[test]
fn test_explicit_hyperparameters() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(flopmap(&dir).args([
        "analyze", "--seq-len", "1", "--hidden-dim", "1", "--ffn-multiplier", "1", "--heads", "1",
        "--no-chart",
    ]));
    assert!(out.contains("- Self Attention: 16\n"));
    assert!(out.contains("- Add & Norm 1: 7\n"));
    assert!(out.contains("- FFN: 5\n"));
    assert!(out.ends_with("Total Complexity: 35\n"));
}

#[test]
fn test_non_terminal_stdout_skips_interactive_chart() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(flopmap(&dir).arg("analyze"));
    assert!(out.starts_with("Complexity Breakdown:\n"));
}

#[test]
fn test_negative_input_is_rejected_before_output() {
    let dir = TempDir::new().unwrap();
    let output = flopmap(&dir)
        .args(["analyze", "--heads", "-3", "--no-chart"])
        .assert()
        .code(2)
        .get_output()
        .clone();

    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[E042]"), "{stderr}");
    assert!(stderr.contains("num_heads must be non-negative, got -3"), "{stderr}");
}

#[test]
fn test_zero_total_prints_report_then_fails_chart_export() {
    let dir = TempDir::new().unwrap();
    let output = flopmap(&dir)
        .args(["analyze", "--seq-len", "0", "--chart-output", "chart.svg"])
        .assert()
        .code(4)
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("Total Complexity: 0\n"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[E033]"), "{stderr}");
    assert!(stderr.contains("every module cost is zero"), "{stderr}");
    assert!(!dir.path().join("chart.svg").exists());
}

#[test]
fn test_svg_export() {
    let dir = TempDir::new().unwrap();
    flopmap(&dir)
        .args(["analyze", "--chart-output", "chart.svg", "--no-chart"])
        .assert()
        .success();

    let svg = fs::read_to_string(dir.path().join("chart.svg")).unwrap();
    assert!(svg.contains("Model Complexity Breakdown"));
    assert!(svg.contains(">74.8%</text>"));
}

#[test]
fn test_json_format() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(flopmap(&dir).args(["analyze", "-f", "json", "--no-chart"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["total"], 12_917_145_600u64);
    assert_eq!(value["modules"][2]["module"], "FFN");
}

#[test]
fn test_report_to_file() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(flopmap(&dir).args(["analyze", "-o", "report.md", "-f", "markdown", "--no-chart"]));
    assert!(out.is_empty());
    let md = fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(md.contains("| Add & Norm 2 | 2752512 | 0.0% |"));
}

#[test]
fn test_report_file_stays_plain_when_color_is_forced() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(
        flopmap(&dir)
            .env_remove("NO_COLOR")
            .env("CLICOLOR_FORCE", "1")
            .args(["analyze", "-o", "report.txt", "--no-chart"]),
    );
    assert!(out.is_empty());

    let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(!report.contains('\x1b'), "{report:?}");
    assert!(report.starts_with("Complexity Breakdown:\n"));
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".flopmap.toml"),
        indoc! {r#"
            [model]
            seq_len = 1
            hidden_dim = 1
            ffn_multiplier = 1
            num_heads = 1

            [chart]
            enabled = false
        "#},
    )
    .unwrap();

    let out = stdout_of(flopmap(&dir).arg("analyze"));
    assert!(out.ends_with("Total Complexity: 35\n"));

    // flags win over the file
    let out = stdout_of(flopmap(&dir).args(["analyze", "--heads", "2"]));
    assert!(out.contains("- Self Attention: 20\n"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let output = flopmap(&dir)
        .args(["analyze", "--config", "missing.toml", "--no-chart"])
        .assert()
        .code(3)
        .get_output()
        .clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Configuration error"), "{stderr}");
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();
    flopmap(&dir).arg("init").assert().success();
    assert!(dir.path().join(".flopmap.toml").is_file());

    flopmap(&dir).arg("init").assert().failure();
    flopmap(&dir).args(["init", "--force"]).assert().success();
}

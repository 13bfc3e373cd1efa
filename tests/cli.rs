use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("bdl-plot").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bdl-plot"))
        .stdout(predicate::str::contains("reconstructions"));
}

#[test]
fn options_prints_defaults_as_json() {
    let mut cmd = Command::cargo_bin("bdl-plot").unwrap();
    cmd.arg("options");
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["dictionary"]["num_to_show"], 16);
    assert_eq!(v["coefficients"]["plot_type"], "error_bar");
}

#[test]
fn signals_writes_a_script() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("signals.csv");
    std::fs::write(&csv, "1,2,3\n4,5,6\n").unwrap();
    let scripts = dir.path().join("scripts");

    let mut cmd = Command::cargo_bin("bdl-plot").unwrap();
    cmd.args(["signals", "--title", "Raw signals", "--input"])
        .arg(&csv)
        .arg("--script-dir")
        .arg(&scripts)
        .arg("--figure-dir")
        .arg(dir.path().join("figures"));
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote script"));

    let script = std::fs::read_to_string(scripts.join("Raw_signals.py")).unwrap();
    assert!(script.contains("plt.subplots(4, 4"));
    assert!(script.contains("Raw_signals.pdf"));
}

#[test]
fn native_reconstructions_write_svg() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("recs.json");
    std::fs::write(
        &input,
        r#"[{"signal": [1.0, 2.0, 3.0], "estimate": [
            {"mean": 1.1, "variance": 0.01},
            {"mean": 1.9, "variance": 0.04},
            {"mean": 3.2, "variance": 0.02}]}]"#,
    )
    .unwrap();
    let figures = dir.path().join("figures");

    let mut cmd = Command::cargo_bin("bdl-plot").unwrap();
    cmd.args(["--renderer", "native", "reconstructions", "--subtitle", "run 1", "--input"])
        .arg(&input)
        .arg("--figure-dir")
        .arg(&figures);
    cmd.assert().success();
    assert!(figures.join("Reconstructions__run_1.svg").exists());
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = Command::cargo_bin("bdl-plot").unwrap();
    cmd.args(["--format", "gif", "options"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("figure_format"));
}

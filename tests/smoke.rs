use std::io::Write;

use assert_cmd::Command;
use serde_json::Value;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("medscribe").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn analyze_prints_report_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Doctor: How are you?").unwrap();
    writeln!(file, "Patient: I have a slight backache but I expect a full recovery.").unwrap();

    let output = Command::cargo_bin("medscribe")
        .unwrap()
        .arg("analyze")
        .arg("--input")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["Patient_Intent"], "Reporting symptoms");
}

#[test]
fn parse_reads_stdin() {
    let output = Command::cargo_bin("medscribe")
        .unwrap()
        .arg("parse")
        .write_stdin("Physician: Hello\nnoise\nPatient: Hi\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let turns: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(turns.as_array().unwrap().len(), 2);
    assert_eq!(turns[0]["speaker"], "physician");
}

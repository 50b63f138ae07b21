use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn bin() -> Command {
    Command::cargo_bin("phpstan-lint").unwrap()
}

#[test]
fn test_schema_lists_config_fields() {
    bin()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error_format\""))
        .stdout(predicate::str::contains("\"config_markers\""));
}

#[test]
fn test_parse_json_report_narrows_to_token() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.php"),
        "<?php\n\nfunction f() {\n\n    echo $x;\n}\n",
    )
    .unwrap();
    let report = r#"{"files":{"a.php":{"messages":[{"message":"Undefined variable: $x","line":5,"identifier":"variable.undefined"}]}}}"#;

    bin()
        .args(["parse", "--base"])
        .arg(dir.path())
        .write_stdin(report)
        .assert()
        .success()
        .stdout("a.php:5:10: error: Undefined variable: $x\n");
}

#[test]
fn test_parse_json_output_format() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.php"), "<?php\n    $user->save();\n").unwrap();
    let report = r#"{"files":{"a.php":{"messages":[{"message":"Call to an undefined method App\\User::save().","line":2,"identifier":"method.notFound","tip":"Learn more."}]}}}"#;

    let output = bin()
        .args(["parse", "--format", "json", "--base"])
        .arg(dir.path())
        .write_stdin(report)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let finding = &value["findings"][0];
    assert_eq!(finding["line"], 1);
    assert_eq!(finding["col_start"], 11);
    assert_eq!(finding["col_end"], 15);
    assert_eq!(
        finding["message"],
        "Call to an undefined method App\\User::save().\n💡 Learn more."
    );
}

#[test]
fn test_parse_malformed_report_is_not_fatal() {
    bin()
        .arg("parse")
        .write_stdin("PHP Fatal error:  Uncaught Error")
        .assert()
        .success()
        .stdout("No errors in 0 files\n")
        .stderr(predicate::str::contains("malformed output"));
}

#[test]
fn test_parse_raw_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.php"), "<?php\n  return $y;\n").unwrap();

    bin()
        .args(["parse", "--error-format", "raw", "--base"])
        .arg(dir.path())
        .write_stdin("b.php:2:Variable $y might not be defined.\n")
        .assert()
        .success()
        .stdout("b.php:2:3: error: Variable $y might not be defined.\n");
}

#[test]
fn test_lint_rejects_bad_level() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.php"), "<?php").unwrap();

    bin()
        .current_dir(dir.path())
        .args(["lint", "--level", "eleven", "a.php"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid level"));
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn md2docx() -> Command {
    Command::cargo_bin("md2docx").expect("binary should be built")
}

#[test]
fn test_no_arguments_converts_default_report() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("ProjectReport.md"), "# Report\n\nBody text.\n").unwrap();

    md2docx()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved DOCX to: "))
        .stdout(predicate::str::contains("ProjectReport.docx"));

    assert!(temp_dir.path().join("ProjectReport.docx").is_file());
}

#[test]
fn test_missing_input_reports_and_exits_cleanly() {
    let temp_dir = tempdir().unwrap();

    md2docx()
        .current_dir(temp_dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Markdown file not found: "));

    assert!(!temp_dir.path().join("ProjectReport.docx").exists());
}

#[test]
fn test_explicit_input_and_output() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("notes.md");
    let output = temp_dir.path().join("nested").join("notes.docx");
    fs::write(&input, "- a\n- b\n").unwrap();

    md2docx()
        .current_dir(temp_dir.path())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.is_file());
}

#[test]
fn test_config_file_paths_are_used() {
    let temp_dir = tempdir().unwrap();
    fs::create_dir(temp_dir.path().join("docs")).unwrap();
    fs::write(temp_dir.path().join("docs").join("in.md"), "text\n").unwrap();
    fs::write(
        temp_dir.path().join(".md2docx.toml"),
        "[paths]\ninput = \"docs/in.md\"\noutput = \"docs/out.docx\"\n",
    )
    .unwrap();

    md2docx().current_dir(temp_dir.path()).assert().success();
    assert!(temp_dir.path().join("docs").join("out.docx").is_file());
}

#[test]
fn test_invalid_config_is_a_tool_error() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".md2docx.toml"), "[body]\nsize-pt = -3.0\n").unwrap();

    md2docx()
        .current_dir(temp_dir.path())
        .arg("--color")
        .arg("never")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_no_config_ignores_broken_config() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".md2docx.toml"), "not toml at all [").unwrap();
    fs::write(temp_dir.path().join("ProjectReport.md"), "# Title\n").unwrap();

    md2docx().current_dir(temp_dir.path()).arg("--no-config").assert().success();
}

#[test]
fn test_print_config_shows_defaults() {
    let temp_dir = tempdir().unwrap();

    md2docx()
        .current_dir(temp_dir.path())
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[body]"))
        .stdout(predicate::str::contains("font = \"SimSun\""));
}

#[test]
fn test_init_writes_config_once() {
    let temp_dir = tempdir().unwrap();

    md2docx().current_dir(temp_dir.path()).arg("--init").assert().success();
    assert!(temp_dir.path().join(".md2docx.toml").is_file());

    md2docx()
        .current_dir(temp_dir.path())
        .arg("--init")
        .arg("--color")
        .arg("never")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

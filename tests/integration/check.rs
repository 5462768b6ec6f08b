use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

/// Test checking templates with only well-placed directives
#[test]
fn test_check_valid_templates() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("a.j2", "x:\n  {% indented-include 'a' %}\n  {% indented-include 'b' %}")?;
    project.write_file("b.j2", "no directives here {% include 'c' %}")?;

    project
        .command()
        .args(["check", "a.j2", "b.j2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.j2 (2 directives)"))
        .stdout(predicate::str::contains("b.j2 (0 directives)"));
    Ok(())
}

/// Test that every misplaced directive is reported
#[test]
fn test_check_reports_all_errors() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file(
        "bad.j2",
        "- {% indented-include 'a' %}\n  {% indented-include 'ok' %}\nx: {% indented-include 'b' %}",
    )?;

    let output = project.run(&["check", "bad.j2"])?;
    output
        .assert_failure()
        .assert_stderr_contains("2 misplaced indented-include directive(s) found");
    assert!(output.stdout.contains("bad.j2, line 1)"));
    assert!(output.stdout.contains("bad.j2, line 3)"));
    assert!(!output.stdout.contains("line 2)"));
    Ok(())
}

/// Test JSON output
#[test]
fn test_check_json_output() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("bad.j2", "\n\nkey: {% indented-include 'v' %}")?;

    let output = project.run(&["check", "--format", "json", "bad.j2"])?;
    output.assert_failure();

    let report: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["valid"], false);
    assert_eq!(report["files"][0]["path"], "bad.j2");
    assert_eq!(report["files"][0]["directives"], 1);
    assert_eq!(report["files"][0]["errors"][0]["line"], 3);
    Ok(())
}

/// Test that check requires at least one file
#[test]
fn test_check_without_files_is_usage_error() -> Result<()> {
    let project = TestProject::new()?;

    project.command().arg("check").assert().failure().code(2);
    Ok(())
}

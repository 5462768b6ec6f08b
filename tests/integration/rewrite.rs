use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

/// Test rewriting a file to stdout
#[test]
fn test_rewrite_file_to_stdout() -> Result<()> {
    indented_include::test_utils::init_test_logging(None);
    let project = TestProject::new()?;
    project.write_file("page.j2", "root:\n  {% indented-include \"child.j2\" %}\n")?;

    project.command().args(["rewrite", "page.j2"]).assert().success().stdout(
        "root:\n  {% filter indent(\"  \") %}{% include \"child.j2\" %}{% endfilter %}\n",
    );
    Ok(())
}

/// Test rewriting stdin when no file is given
#[test]
fn test_rewrite_stdin() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .arg("rewrite")
        .write_stdin("{%- indented-include 'f' +%}")
        .assert()
        .success()
        .stdout("{%- filter indent(\"\") %}{% include 'f' %}{% endfilter +%}");
    Ok(())
}

/// Test that argument text is passed through untouched
#[test]
fn test_rewrite_keeps_arguments() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .arg("rewrite")
        .write_stdin("    {% indented-include [\"a\",\"b\"] ignore missing with context %}")
        .assert()
        .success()
        .stdout(
            "    {% filter indent(\"    \") %}{% include [\"a\",\"b\"] ignore missing with context %}{% endfilter %}",
        );
    Ok(())
}

/// Test custom block delimiters from the command line
#[test]
fn test_rewrite_custom_delimiters() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command()
        .args(["rewrite", "--block-start", "<%", "--block-end", "%>"])
        .write_stdin("\t<% indented-include 'x' %>\n{% indented-include 'y' %}")
        .assert()
        .success()
        .stdout("\t<% filter indent(\"\t\") %><% include 'x' %><% endfilter %>\n{% indented-include 'y' %}");
    Ok(())
}

/// Test writing the result with --output
#[test]
fn test_rewrite_to_output_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("a.j2", "  {% indented-include 'x' %}")?;

    project
        .command()
        .args(["rewrite", "a.j2", "--output", "build/a.j2"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        project.read_file("build/a.j2")?,
        "  {% filter indent(\"  \") %}{% include 'x' %}{% endfilter %}"
    );
    Ok(())
}

/// Test the error report for a misplaced directive
#[test]
fn test_rewrite_misplaced_directive_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("bad.j2", "ok\nkey: {% indented-include 'v' %}\n")?;

    let output = project.run(&["rewrite", "bad.j2"])?;
    output
        .assert_failure()
        .assert_stderr_contains("line contains non-whitespace characters before include statement")
        .assert_stderr_contains("line 2")
        .assert_stderr_contains("suggestion");
    assert!(output.stdout.is_empty());
    Ok(())
}

/// Test a missing input file
#[test]
fn test_rewrite_missing_input() -> Result<()> {
    let project = TestProject::new()?;

    project
        .run(&["rewrite", "nope.j2"])?
        .assert_failure()
        .assert_stderr_contains("Input file not found");
    Ok(())
}

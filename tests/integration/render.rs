use anyhow::Result;
use predicates::prelude::*;
use indented_include::test_utils::TemplateFixture;

use crate::common::TestProject;

/// Test rendering a YAML document with an indented include
#[test]
fn test_render_yaml_fixture() -> Result<()> {
    indented_include::test_utils::init_test_logging(None);
    let project = TestProject::new()?;
    let fixture = TemplateFixture::yaml_service();
    project.write_fixture(&fixture)?;

    project
        .command()
        .args(["render", fixture.entry.as_str(), "--context", "context.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff(fixture.expected.clone()));
    Ok(())
}

/// Test a directive inside a loop
#[test]
fn test_render_nested_loop_fixture() -> Result<()> {
    let project = TestProject::new()?;
    let fixture = TemplateFixture::nested_loop();
    project.write_fixture(&fixture)?;

    project
        .run(&["render", fixture.entry.as_str(), "--context", "context.json", "-o", "out.txt"])?
        .assert_success();
    assert_eq!(project.read_file("out.txt")?, fixture.expected);
    Ok(())
}

/// Test an explicit template directory
#[test]
fn test_render_with_template_dir() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("other/main.txt", "a:\n    {% indented-include 'part.txt' %}")?;
    project.write_file("other/part.txt", "b: 1\nc: 2")?;

    project
        .command()
        .args(["render", "main.txt", "--template-dir", "other"])
        .assert()
        .success()
        .stdout("a:\n    b: 1\n    c: 2");
    Ok(())
}

/// Test the report for a misplaced directive in the entry template
#[test]
fn test_render_misplaced_directive() -> Result<()> {
    let project = TestProject::new()?;
    let fixture = TemplateFixture::misplaced();
    project.write_fixture(&fixture)?;

    project
        .run(&["render", fixture.entry.as_str()])?
        .assert_failure()
        .assert_stderr_contains("line contains non-whitespace characters before include statement")
        .assert_stderr_contains("line 2");
    Ok(())
}

/// Test the report for a misplaced directive in an included template
#[test]
fn test_render_misplaced_directive_in_include() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("main.txt", "{% include 'inner.txt' %}")?;
    project.write_template("inner.txt", "\n\n\n- {% indented-include 'x.txt' %}")?;
    project.write_template("x.txt", "x")?;

    project
        .run(&["render", "main.txt"])?
        .assert_failure()
        .assert_stderr_contains("inner.txt, line 4");
    Ok(())
}

/// Test a missing template
#[test]
fn test_render_missing_template() -> Result<()> {
    let project = TestProject::new()?;

    project
        .run(&["render", "missing.txt"])?
        .assert_failure()
        .assert_stderr_contains("Template 'missing.txt' not found");
    Ok(())
}

/// Test a context file that is not a JSON object
#[test]
fn test_render_rejects_non_object_context() -> Result<()> {
    let project = TestProject::new()?;
    project.write_template("main.txt", "hi")?;
    project.write_file("ctx.json", "[1, 2, 3]")?;

    project
        .run(&["render", "main.txt", "--context", "ctx.json"])?
        .assert_failure()
        .assert_stderr_contains("must contain a JSON object");
    Ok(())
}

use anyhow::Result;

use crate::common::TestProject;

const ANGLE_CONFIG: &str = r#"
[syntax]
block_start = "<%"
block_end = "%>"
"#;

/// Test that indented-include.toml in the working directory is picked up
#[test]
fn test_project_config_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("indented-include.toml", ANGLE_CONFIG)?;

    project
        .command()
        .arg("rewrite")
        .write_stdin("  <% indented-include 'x' %>")
        .assert()
        .success()
        .stdout("  <% filter indent(\"  \") %><% include 'x' %><% endfilter %>");
    Ok(())
}

/// Test the global configuration file in the user config directory
#[cfg(target_os = "linux")]
#[test]
fn test_global_config_file() -> Result<()> {
    let project = TestProject::new()?;
    let global = project.config_home().join("indented-include").join("config.toml");
    std::fs::create_dir_all(global.parent().unwrap())?;
    std::fs::write(&global, ANGLE_CONFIG)?;

    project
        .command()
        .arg("rewrite")
        .write_stdin("<% indented-include 'x' %>")
        .assert()
        .success()
        .stdout("<% filter indent(\"\") %><% include 'x' %><% endfilter %>");
    Ok(())
}

/// Test the environment variable and --config, in priority order
#[test]
fn test_explicit_config_wins() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("indented-include.toml", ANGLE_CONFIG)?;
    let from_env = project.write_file(
        "env.toml",
        "[syntax]\nblock_start = \"[%\"\nblock_end = \"%]\"\nvariable_start = \"[[\"\nvariable_end = \"]]\"\n",
    )?;
    let explicit = project.write_file("explicit.toml", "")?;

    project
        .command()
        .env("INDENTED_INCLUDE_CONFIG", &from_env)
        .arg("rewrite")
        .write_stdin("[% indented-include 'x' %]")
        .assert()
        .success()
        .stdout("[% filter indent(\"\") %][% include 'x' %][% endfilter %]");

    project
        .command()
        .env("INDENTED_INCLUDE_CONFIG", &from_env)
        .args(["--config", "explicit.toml", "rewrite"])
        .write_stdin("{% indented-include 'x' %}")
        .assert()
        .success()
        .stdout("{% filter indent(\"\") %}{% include 'x' %}{% endfilter %}");

    assert!(explicit.exists());
    Ok(())
}

/// Test a missing --config path
#[test]
fn test_missing_config_file() -> Result<()> {
    let project = TestProject::new()?;

    project
        .run(&["--config", "nope.toml", "rewrite"])?
        .assert_failure()
        .assert_stderr_contains("Configuration file not found");
    Ok(())
}

/// Test that identical block delimiters are rejected
#[test]
fn test_invalid_delimiters_rejected() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file(
        "indented-include.toml",
        "[syntax]\nblock_start = \"%%\"\nblock_end = \"%%\"\n",
    )?;

    project
        .run(&["rewrite"])?
        .assert_failure()
        .assert_stderr_contains("Invalid delimiter configuration");
    Ok(())
}

/// Test the report for malformed TOML
#[test]
fn test_malformed_config() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("indented-include.toml", "[syntax\nblock_start = ")?;

    project
        .run(&["rewrite"])?
        .assert_failure()
        .assert_stderr_contains("suggestion");
    Ok(())
}

//! Smoke tests for the `sqlmask` binary.

#![cfg(feature = "cli")]

use std::io::Write as _;
use std::process::{Command, Output};

fn sqlmask(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlmask"))
        .args(args)
        .output()
        .expect("sqlmask should spawn")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_command_prints_usage() {
    let result = sqlmask(&["--help"]);
    assert!(result.status.success());
    assert!(stdout(&result).contains("Usage: sqlmask <COMMAND>"));
}

#[test]
fn resolve_prints_one_column_per_line() {
    let result = sqlmask(&["resolve", "UPDATE `t` SET `a` = ? WHERE `b` IN (?, ?)"]);
    assert!(result.status.success());
    assert_eq!(stdout(&result), "a\nb\nb\n");
}

#[test]
fn resolve_json_emits_array() {
    let result = sqlmask(&["resolve", "--json", "INSERT INTO `t` (`x`, `y`) VALUES (?, ?)"]);
    assert!(result.status.success());
    assert_eq!(stdout(&result).trim_end(), r#"["x","y"]"#);
}

#[test]
fn render_masks_requested_columns() {
    let result = sqlmask(&[
        "render",
        "--mask",
        "password",
        "--format",
        "{{ query }}",
        "UPDATE `u` SET `password` = ? WHERE `id` = ?",
        "hunter2",
        "7",
    ]);
    assert!(result.status.success());
    assert_eq!(
        stdout(&result),
        "UPDATE `u` SET `password` = ? WHERE `id` = ?; [* SECRET *, \"7\"]\n"
    );
}

#[test]
fn render_reads_masks_from_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "masked_columns = [\"token\"]\nformat = \"{{{{ query }}}}\"").unwrap();
    let path = config.path().to_str().unwrap().to_string();
    let result = sqlmask(&[
        "render",
        "--config",
        &path,
        "SELECT * FROM `s` WHERE `token` = ?",
        "abc",
    ]);
    assert!(result.status.success());
    assert_eq!(
        stdout(&result),
        "SELECT * FROM `s` WHERE `token` = ?; [* SECRET *]\n"
    );
}

#[test]
fn render_rejects_broken_template() {
    let result = sqlmask(&["render", "--format", "{{ query", "SELECT 1"]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("QLM-1001"));
}

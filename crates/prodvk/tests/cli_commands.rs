#![cfg(all(unix, feature = "cli"))]

use std::process::{Command, Output};

fn prodvk(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prodvk"))
        .args(args)
        .env_remove("PRODVK_VID")
        .env_remove("PRODVK_PID")
        .env_remove("PRODVK_SERIAL")
        .env_remove("PRODVK_TIMEOUT")
        .output()
        .expect("prodvk binary should run")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn version_prints_package_version() {
    let output = prodvk(&["version"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("prodvk {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn extended_version_reports_features() {
    let output = prodvk(&["version", "--extended"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: prodvk"));
    assert!(stdout.contains("features: hid=true, cli=true"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let output = prodvk(&[]);

    // clap reports its own parse failures with status 2.
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn bad_args_hex_rejected_before_connect() {
    let output = prodvk(&["send", "READ_ADC", "--args", "0g"]);

    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("invalid hex in --args"));
}

#[test]
fn unknown_subcmd_name_rejected_before_connect() {
    let output = prodvk(&["send", "READ_NOTHING"]);

    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("unknown sub-command"));
}

#[test]
fn zero_timeout_rejected_before_connect() {
    let output = prodvk(&["status", "--timeout", "0s"]);

    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("duration must be greater than zero"));
}

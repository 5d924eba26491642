#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the studentorg-server binary.

use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run_server(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_studentorg-server"));
    cmd.args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute studentorg-server")
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn help_lists_subcommands_and_options() {
    let output = run_server(&["--help"], &[]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--mock"));
}

#[test]
fn version_prints_binary_name() {
    let output = run_server(&["--version"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("studentorg-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn invalid_command_fails() {
    let output = run_server(&["invalid-command"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "{stderr}");
}

#[test]
fn missing_config_file_fails() {
    for flag in ["--config", "-c"] {
        let output = run_server(&[flag, "/nonexistent/studentorg.yaml", "check"], &[]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("does not exist"), "{stderr}");
    }
}

#[test]
fn unknown_config_key_fails_check() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "typo.yaml", "database:\n  dns: \"sqlite::memory:\"\n");

    let output = run_server(&["--config", &path, "check"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "{stderr}");
}

#[test]
fn check_prints_config_without_the_deploy_token() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "valid.yaml",
        r#"
server:
  bind_addr: "127.0.0.1:18087"
database:
  dsn: "sqlite::memory:"
  max_connections: 1
deploy:
  pipeline_url: "http://127.0.0.1:9/deploy"
"#,
    );

    let output = run_server(
        &["--config", &path, "check"],
        &[("STUDENTORG__DEPLOY__TOKEN", "very-secret-deploy-token")],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "STDOUT: {stdout}\nSTDERR: {stderr}");
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("127.0.0.1:18087"));
    assert!(stdout.contains("[REDACTED]"));
    assert!(!stdout.contains("very-secret-deploy-token"));
    assert!(!stderr.contains("very-secret-deploy-token"));
}

#[test]
fn print_config_applies_cli_overrides() {
    let output = run_server(&["--print-config", "--port", "18123", "--mock"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration"));
    assert!(stdout.contains("127.0.0.1:18123"));
    assert!(stdout.contains("sqlite::memory:"));
}

#[test]
fn run_rejects_bad_bind_address() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "bad_addr.yaml",
        "server:\n  bind_addr: \"not-an-address\"\n",
    );

    let output = run_server(&["--config", &path, "--mock", "run"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid bind address"), "{stderr}");
}

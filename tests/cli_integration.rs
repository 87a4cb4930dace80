//! Integration tests for the `cmdtree` binary.
//!
//! Each test runs the binary in a sandbox: a temporary directory that acts
//! as `$HOME` and `$XDG_CONFIG_HOME`, so no user configuration leaks in.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TP_COMMANDS: &str = r#"
[[command]]
name = "tp"
aliases = ["teleport"]
description = "Teleport somewhere"
permission = "tp.use"
permission_message = "You may not teleport"

[[command.node]]
literal = "here"
reply = "Teleported {sender} here"

[[command.node]]
argument = "x"
type = "integer"
min = 0

  [[command.node.node]]
  argument = "y"
  type = "integer"
  min = 0
  reply = "Teleported to {x} {y}"
"#;

// =============================================================================
// Test Fixtures
// =============================================================================

/// A throwaway home directory with a command file in it.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::write(dir.path().join("commands.toml"), TP_COMMANDS).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn commands(&self) -> PathBuf {
        self.path().join("commands.toml")
    }

    /// Write `$XDG_CONFIG_HOME/cmdtree/config.toml`.
    fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.path().join("xdg/cmdtree");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    /// The binary, isolated from the real environment.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cmdtree").unwrap();
        cmd.env_remove("CMDTREE_CONFIG")
            .env_remove("RUST_LOG")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .current_dir(self.path());
        cmd
    }

    /// The binary with `--commands` pointing at the sandbox file.
    fn with_commands(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--commands").arg(self.commands());
        cmd
    }
}

// =============================================================================
// run
// =============================================================================

#[test]
fn run_dispatches_and_prints_replies() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["--permission", "tp.use", "run", "tp", "here"])
        .assert()
        .success()
        .stdout("Teleported console here\n");

    sandbox
        .with_commands()
        .args(["--sender", "alice", "--permission", "tp.use", "run", "teleport", "3", "4"])
        .assert()
        .success()
        .stdout("Teleported to 3 4\n");
}

#[test]
fn run_failure_exits_one_with_message() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["run", "tp", "here"])
        .assert()
        .code(1)
        .stdout("You may not teleport\n");

    sandbox
        .with_commands()
        .args(["--permission", "tp.use", "run", "tp", "-1"])
        .assert()
        .code(1)
        .stdout("Integer -1 is less than the minimum value 0\n");
}

#[test]
fn run_unknown_command_suggests_a_label() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["run", "tpp", "here"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown command 'tpp'"))
        .stderr(predicate::str::contains("did you mean 'tp'?"));
}

#[test]
fn run_json_reports_outcome_and_messages() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["--json", "--permission", "tp.use", "run", "tp", "here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("Teleported console here"));

    sandbox
        .with_commands()
        .args(["--json", "run", "tp", "here"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"kind\": \"requirement\""))
        .stdout(predicate::str::contains("You may not teleport"));
}

#[test]
fn quiet_suppresses_replies_but_keeps_exit_code() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["-q", "run", "tp", "here"])
        .assert()
        .code(1)
        .stdout("");
}

// =============================================================================
// complete
// =============================================================================

#[test]
fn complete_prints_one_suggestion_per_line() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["--permission", "tp.use", "complete", "tp "])
        .assert()
        .success()
        .stdout("here\n");

    sandbox
        .with_commands()
        .args(["--permission", "tp.use", "complete", "t"])
        .assert()
        .success()
        .stdout("teleport\ntp\n");
}

#[test]
fn complete_hides_commands_the_sender_cannot_use() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["complete", "t"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn complete_json_is_an_array() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .with_commands()
        .args(["--json", "--permission", "*", "complete", "tp h"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let suggestions: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(suggestions, vec!["here"]);
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_lists_usage_paths() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "tp (aliases: teleport) - Teleport somewhere",
        ))
        .stdout(predicate::str::contains("  tp here\n  tp <x> <y>"))
        .stdout(predicate::str::contains("1 command(s) OK"));
}

#[test]
fn check_rejects_an_invalid_command_file() {
    let sandbox = Sandbox::new();
    let bad = sandbox.path().join("bad.toml");
    fs::write(
        &bad,
        "[[command]]\nname = \"x\"\n[[command.node]]\nargument = \"n\"\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .arg("--commands")
        .arg(&bad)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bad.toml"));
}

#[test]
fn missing_command_file_is_a_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no command file"));
}

// =============================================================================
// repl
// =============================================================================

#[test]
fn repl_dispatches_lines_and_answers_completions() {
    let sandbox = Sandbox::new();
    sandbox
        .with_commands()
        .args(["--permission", "tp.use", "repl"])
        .write_stdin("tp here\n\ntp ?\nnope\ntp 1 2\n")
        .assert()
        .success()
        .stdout("Teleported console here\nhere\nTeleported to 1 2\n")
        .stderr(predicate::str::contains("unknown command 'nope'"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_file_supplies_sender_and_command_file() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config(
        r#"
        [console]
        name = "operator"
        permissions = ["tp.use"]
        commands_file = "commands.toml"
        "#,
    );
    fs::copy(sandbox.commands(), config.with_file_name("commands.toml")).unwrap();

    sandbox
        .cmd()
        .args(["run", "tp", "here"])
        .assert()
        .success()
        .stdout("Teleported operator here\n");

    sandbox
        .cmd()
        .args(["config", "get", "console.name"])
        .assert()
        .success()
        .stdout("operator\n");

    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xdg/cmdtree/config.toml"));
}

#[test]
fn config_defaults_without_a_file() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "get", "engine.suggestion_limit"])
        .assert()
        .success()
        .stdout("1024\n");

    sandbox
        .cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Defaults (no config file)"))
        .stdout(predicate::str::contains("console.name = console"));

    sandbox
        .cmd()
        .args(["config", "get", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key: nope"));
}

#[test]
fn invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[engine]\nsuggestion_limit = 0\n");
    sandbox
        .cmd()
        .arg("config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn small_suggestion_limit_rejects_wide_ranges() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[engine]\nsuggestion_limit = 5\n");
    let wide = sandbox.path().join("wide.toml");
    fs::write(
        &wide,
        r#"
        [[command]]
        name = "dial"
        [[command.node]]
        argument = "n"
        type = "integer"
        min = 0
        max = 9
        suggest = true
        reply = "{n}"
        "#,
    )
    .unwrap();

    sandbox
        .cmd()
        .arg("--commands")
        .arg(&wide)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds the limit of 5"));
}

// =============================================================================
// completion
// =============================================================================

#[test]
fn completion_generates_a_script() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cmdtree"));
}

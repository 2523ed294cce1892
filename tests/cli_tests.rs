//! CLI integration tests

use std::fs;
use std::path::Path;
use std::process::Command;

use predicates::prelude::*;
use serde_json::Value;

fn memory_chunker_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_memory-chunker"))
}

/// Binary with config, preferences and home redirected into `root`
fn sandboxed(root: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("memory-chunker").unwrap();
    cmd.env("XDG_CONFIG_HOME", root.join("config"))
        .env("HOME", root)
        .env_remove("MEMORY_CHUNKER_WORKER_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let output = memory_chunker_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("memory chunks"));
    assert!(stdout.contains("select-file"));
    assert!(stdout.contains("process"));
    assert!(stdout.contains("transcribe"));
    assert!(stdout.contains("dirs"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("--worker-dir"));
    assert!(stdout.contains("--timeout"));
}

#[test]
fn version_output() {
    let output = memory_chunker_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("memory-chunker"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn process_help_lists_inputs() {
    let output = memory_chunker_bin()
        .args(["process", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--title"));
    assert!(stdout.contains("--instruction"));
    assert!(stdout.contains("--mode"));
    assert!(stdout.contains("[default: rag]"));
}

#[test]
fn config_help() {
    let output = memory_chunker_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let output = memory_chunker_bin()
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn invalid_select_kind_error() {
    let output = memory_chunker_bin()
        .args(["select-file", "--kind", "video"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value"),
        "Expected error about invalid kind, got: {}",
        stderr
    );
}

#[cfg(target_os = "linux")]
mod sandboxed {
    use super::*;

    #[test]
    fn config_path_command() {
        let root = tempfile::tempdir().unwrap();
        sandboxed(root.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("memory-chunker"))
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_set_then_get_normalizes_timeout() {
        let root = tempfile::tempdir().unwrap();
        sandboxed(root.path())
            .args(["config", "set", "worker_timeout", "90s"])
            .assert()
            .success();
        sandboxed(root.path())
            .args(["config", "get", "worker_timeout"])
            .assert()
            .success()
            .stdout("1m30s\n");
    }

    #[test]
    fn config_rejects_unknown_key() {
        let root = tempfile::tempdir().unwrap();
        sandboxed(root.path())
            .args(["config", "set", "api_key", "secret"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Unknown key"));
    }

    #[test]
    fn config_init_twice_fails() {
        let root = tempfile::tempdir().unwrap();
        sandboxed(root.path()).args(["config", "init"]).assert().success();
        sandboxed(root.path())
            .args(["config", "init"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn invalid_timeout_is_usage_error() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("notes.txt");
        fs::write(&source, "hello").unwrap();

        sandboxed(root.path())
            .args(["process", source.to_str().unwrap(), "--timeout", "soon"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid duration"));
    }

    #[test]
    fn missing_source_file_is_reported() {
        let root = tempfile::tempdir().unwrap();
        sandboxed(root.path())
            .args(["process", "does-not-exist.txt", "--dialogs", "terminal"])
            .current_dir(root.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Source file not found"));
    }

    fn install_worker(root: &Path) -> std::path::PathBuf {
        let worker_dir = root.join("worker");
        fs::create_dir_all(&worker_dir).unwrap();
        fs::write(
            worker_dir.join("process.sh"),
            "printf 'wrote %s from %s (%s)\\n' \"$5\" \"$1\" \"$4\"\n",
        )
        .unwrap();

        let config_dir = root.join("config").join("memory-chunker");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "interpreter = \"/bin/sh\"\nprocess_script = \"process.sh\"\n",
        )
        .unwrap();
        worker_dir
    }

    #[test]
    fn process_runs_worker_with_terminal_dialogs() {
        let root = tempfile::tempdir().unwrap();
        let worker_dir = install_worker(root.path());
        let source = root.path().join("notes.txt");
        fs::write(&source, "hello").unwrap();
        let destination = root.path().join("out.jsonl");

        sandboxed(root.path())
            .args(["process", "notes.txt", "--title", "Notes", "--dialogs", "terminal"])
            .arg("--worker-dir")
            .arg(&worker_dir)
            .current_dir(root.path())
            .write_stdin(format!("{}\n", destination.display()))
            .assert()
            .success()
            .stdout(format!(
                "wrote {} from {} (rag)\n",
                destination.display(),
                source.display()
            ));

        let prefs: Value = serde_json::from_str(
            &fs::read_to_string(root.path().join("config/memory-chunker/preferences.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(prefs["saveDirectory"], root.path().to_str().unwrap());
    }

    #[test]
    fn canceled_save_exits_with_canceled_code() {
        let root = tempfile::tempdir().unwrap();
        let worker_dir = install_worker(root.path());
        fs::write(root.path().join("notes.txt"), "hello").unwrap();

        sandboxed(root.path())
            .args(["process", "notes.txt", "--dialogs", "terminal"])
            .arg("--worker-dir")
            .arg(&worker_dir)
            .current_dir(root.path())
            .write_stdin("-\n")
            .assert()
            .code(3)
            .stdout("")
            .stderr(predicate::str::contains("Save canceled."));
    }

    #[test]
    fn serve_answers_invalid_and_directory_requests() {
        let root = tempfile::tempdir().unwrap();
        let output = sandboxed(root.path())
            .arg("serve")
            .write_stdin(
                "not json\n{\"id\":7,\"op\":\"getDefaultDirectories\"}\n{\"id\":8,\"op\":\"transcribeAudio\",\"args\":{\"sourcePath\":\"No file selected\",\"title\":\"\",\"instruction\":\"\",\"mode\":\"rag\"}}\n",
            )
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let mut responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        responses.sort_by_key(|r| r["id"].as_i64().unwrap_or(-1));

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["status"], "error");
        assert_eq!(responses[1]["status"], "ok");
        assert_eq!(
            responses[1]["result"]["openDirectory"],
            responses[1]["result"]["saveDirectory"]
        );
        assert_eq!(responses[2]["status"], "error");
        assert_eq!(
            responses[2]["message"],
            "No audio file selected. Choose a file before transcribing."
        );
    }
}

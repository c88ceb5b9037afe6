use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const EXAMPLE_CSV: &str = "Timestamp,Name,Amount,Category\n\
2024-03-10,Coffee,120,Cafe\n\
2024-03-10,Salary,50000,Salary\n";

const CONFIG: &str = "income_categories = [\"Salary\"]\nmonthly_limit = 10000\n";

struct Run {
    code: Option<i32>,
    stdout: String,
}

struct Workspace {
    dir: TempDir,
    config: PathBuf,
    csv: PathBuf,
}

fn workspace() -> Option<Workspace> {
    let dir = tempfile::tempdir().ok()?;
    let config = dir.path().join("config.toml");
    let csv = dir.path().join("rows.csv");
    fs::write(&config, CONFIG).ok()?;
    fs::write(&csv, EXAMPLE_CSV).ok()?;
    Some(Workspace { dir, config, csv })
}

fn command(home: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pocketdash"));
    command.args(args);
    command.env("HOME", home);
    command.env_remove("POCKETDASH_CONFIG");
    command.env_remove("POCKETDASH_LOG");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command
}

fn run_cli_with_input(home: &Path, args: &[&str], input: Option<&str>) -> Run {
    let mut command = command(home, args);
    if input.is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::null());
    }

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input {
            let stdin = child.stdin.take();
            assert!(stdin.is_some());
            if let Some(mut pipe) = stdin {
                let write_result = pipe.write_all(body.as_bytes());
                assert!(write_result.is_ok());
            }
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            return Run {
                code: result.status.code(),
                stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            };
        }
    }

    Run {
        code: None,
        stdout: String::new(),
    }
}

fn run_cli(home: &Path, args: &[&str]) -> Run {
    run_cli_with_input(home, args, None)
}

fn parse_json(text: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(text);
    assert!(parsed.is_ok(), "stdout was not JSON: {text}");
    parsed.unwrap_or(Value::Null)
}

#[test]
fn bare_invocation_prints_root_help_and_exits_zero() {
    let home = tempfile::tempdir();
    assert!(home.is_ok());
    if let Ok(home) = home {
        let run = run_cli(home.path(), &[]);
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.starts_with("pocketdash - monthly spending dashboard"));
        assert!(run.stdout.contains("pocketdash show --file rows.csv"));
    }
}

#[test]
fn top_level_help_lists_every_command() {
    let home = tempfile::tempdir();
    assert!(home.is_ok());
    if let Ok(home) = home {
        let run = run_cli(home.path(), &["--help"]);
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.contains("USAGE: pocketdash <command>"));
        for command in ["pocketdash show", "pocketdash watch", "pocketdash config"] {
            assert!(run.stdout.contains(command), "missing {command}");
        }
    }
}

#[test]
fn show_renders_the_month_as_text() {
    let workspace = workspace();
    assert!(workspace.is_some());
    if let Some(workspace) = workspace {
        let run = run_cli(
            workspace.dir.path(),
            &[
                "show",
                "--file",
                &workspace.csv.to_string_lossy(),
                "--config",
                &workspace.config.to_string_lossy(),
                "--now",
                "2024-03-15",
            ],
        );
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.starts_with("Spending for March 2024"));
        assert!(run.stdout.contains("$50,000.00"));
        assert!(run.stdout.contains("$49,880.00"));
        assert!(run.stdout.contains("Cafe"));
    }
}

#[test]
fn show_json_emits_the_success_envelope() {
    let workspace = workspace();
    assert!(workspace.is_some());
    if let Some(workspace) = workspace {
        let run = run_cli(
            workspace.dir.path(),
            &[
                "show",
                "--file",
                &workspace.csv.to_string_lossy(),
                "--config",
                &workspace.config.to_string_lossy(),
                "--now",
                "2024-03-15",
                "--json",
            ],
        );
        assert_eq!(run.code, Some(0));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["ok"], true);
        assert_eq!(payload["command"], "show");
        assert!(payload["version"].is_string());
        assert_eq!(payload["data"]["period_label"], "March 2024");
        assert_eq!(payload["data"]["summary"]["income"], "$50,000.00");
        assert_eq!(payload["data"]["summary"]["expense"], "$120.00");
        assert_eq!(payload["data"]["summary"]["remaining"], "$49,880.00");
        assert_eq!(payload["data"]["legend"][0]["category"], "Cafe");
        assert_eq!(payload["data"]["legend"][0]["percentage"], 100);
    }
}

#[test]
fn header_only_stdin_prints_the_placeholder_and_exits_one() {
    let home = tempfile::tempdir();
    assert!(home.is_ok());
    if let Ok(home) = home {
        let run = run_cli_with_input(
            home.path(),
            &["show", "--file", "-", "--now", "2024-03-15"],
            Some("Timestamp,Name,Amount,Category\n"),
        );
        assert_eq!(run.code, Some(1));
        assert!(run.stdout.starts_with("Unable to load transactions.\n"));
        assert!(run.stdout.contains("  Error:    empty_dataset"));
    }
}

#[test]
fn header_only_stdin_with_json_emits_the_failure_envelope() {
    let home = tempfile::tempdir();
    assert!(home.is_ok());
    if let Ok(home) = home {
        let run = run_cli_with_input(
            home.path(),
            &["show", "--file", "-", "--json"],
            Some("Timestamp,Name,Amount,Category\r\n\r\n"),
        );
        assert_eq!(run.code, Some(1));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["ok"], false);
        assert_eq!(payload["error"]["code"], "empty_dataset");
        assert!(payload["error"]["recovery_steps"].is_array());
        assert_eq!(payload["placeholder"], "Unable to load transactions.");
    }
}

#[test]
fn usage_errors_exit_one_without_a_placeholder() {
    let home = tempfile::tempdir();
    assert!(home.is_ok());
    if let Ok(home) = home {
        let run = run_cli(home.path(), &["show", "--bogus", "--json"]);
        assert_eq!(run.code, Some(1));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["ok"], false);
        assert_eq!(payload["error"]["code"], "invalid_argument");
        assert!(payload.get("placeholder").is_none());

        let text = run_cli(home.path(), &["watch", "--count", "0"]);
        assert_eq!(text.code, Some(1));
        assert!(
            text.stdout
                .starts_with("Something went wrong, but it's easy to fix.")
        );
    }
}

#[test]
fn config_json_reports_the_flag_origin() {
    let workspace = workspace();
    assert!(workspace.is_some());
    if let Some(workspace) = workspace {
        let run = run_cli(
            workspace.dir.path(),
            &[
                "config",
                "--config",
                &workspace.config.to_string_lossy(),
                "--json",
            ],
        );
        assert_eq!(run.code, Some(0));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["ok"], true);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["data"]["origin"], "flag");
    }
}

#[cfg(target_os = "linux")]
#[test]
fn unwritable_stdout_exits_two() {
    let home = tempfile::tempdir();
    let full = fs::OpenOptions::new().write(true).open("/dev/full");
    assert!(home.is_ok());
    assert!(full.is_ok());
    if let (Ok(home), Ok(full)) = (home, full) {
        let mut command = command(home.path(), &["config"]);
        command.stdin(Stdio::null());
        command.stdout(Stdio::from(full));
        let status = command.status();
        assert!(status.is_ok());
        if let Ok(status) = status {
            assert_eq!(status.code(), Some(2));
        }
    }
}

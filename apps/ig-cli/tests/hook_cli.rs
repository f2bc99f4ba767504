// hook_cli.rs — Drives the `intent-gate` binary the way a hook runner would.
//
// Flow:
//   1. Workspace with an intent registry
//   2. `pre` without an active intent → denied, exit 2
//   3. `pre` for select_active_intent → allowed with context
//   4. `post` for a write → trace + intent map updated
//   5. `trace tail` / `index` / `scope` read the results back

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const REGISTRY: &str = r#"active_intents:
  - id: INT-001
    name: Auth rework
    status: IN_PROGRESS
    owned_scope:
      - "src/auth/**"
"#;

fn intent_gate(root: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_intent-gate"))
        .arg("--project-root")
        .arg(root)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
    fs::write(
        dir.path().join(".orchestration/active_intents.yaml"),
        REGISTRY,
    )
    .unwrap();
    dir
}

#[test]
fn pre_denies_mutation_without_intent() {
    let dir = workspace();
    let out = intent_gate(
        dir.path(),
        &["pre"],
        r#"{"tool_name":"write_to_file","params":{"path":"src/auth/a.rs","content":"x"}}"#,
    );

    assert_eq!(out.status.code(), Some(2));
    let decision: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(decision["allow"], false);
    assert_eq!(decision["denial"], "unauthorized");
    assert!(decision["error"].as_str().unwrap().contains("INT-001"));
}

#[test]
fn pre_selects_intent_with_context() {
    let dir = workspace();
    let out = intent_gate(
        dir.path(),
        &["pre"],
        r#"{"tool_name":"select_active_intent","params":{"intent_id":"INT-001"}}"#,
    );

    assert!(out.status.success());
    let decision: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(decision["allow"], true);
    let context = decision["injected_context"].as_str().unwrap();
    assert!(context.contains("<id>INT-001</id>"));
}

#[test]
fn pre_rejects_malformed_input() {
    let dir = workspace();
    let out = intent_gate(dir.path(), &["pre"], "not json");
    assert!(!out.status.success());
    assert_ne!(out.status.code(), Some(2));
}

#[test]
fn post_then_inspect() {
    let dir = workspace();
    let out = intent_gate(
        dir.path(),
        &["post"],
        r#"{"tool_name":"write_to_file","params":{"path":"src/auth/login.rs","content":"fn login() {}\n"},"active_intent_id":"INT-001"}"#,
    );
    assert!(out.status.success());

    let trace = fs::read_to_string(dir.path().join(".orchestration/agent_trace.jsonl")).unwrap();
    assert_eq!(trace.lines().count(), 1);

    let tail = intent_gate(dir.path(), &["trace", "tail", "-n", "5"], "");
    assert!(tail.status.success());
    let tail = String::from_utf8(tail.stdout).unwrap();
    assert!(tail.contains("INT-001"));
    assert!(tail.contains("src/auth/login.rs"));

    let index = intent_gate(dir.path(), &["index"], "");
    let index = String::from_utf8(index.stdout).unwrap();
    assert!(index.contains("| INT-001 | Auth rework | src/auth/login.rs |"));
}

#[test]
fn scope_command_reports_violation() {
    let dir = workspace();

    let inside = intent_gate(dir.path(), &["scope", "INT-001", "src/auth/jwt.rs"], "");
    assert!(inside.status.success());

    let outside = intent_gate(dir.path(), &["scope", "INT-001", "src/db/schema.rs"], "");
    assert!(!outside.status.success());
    assert!(String::from_utf8(outside.stdout)
        .unwrap()
        .contains("OUT OF SCOPE"));
}

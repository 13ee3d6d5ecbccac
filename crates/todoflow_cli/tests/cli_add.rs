use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todoflow-{nanos}-{file_name}"))
}

fn run(store_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_todoflow"))
        .args(args)
        .env("TODOFLOW_STORE_PATH", store_path)
        .env("TODOFLOW_CONFIG_PATH", temp_path("missing-config.json"))
        .env("TODOFLOW_USER", "Ada")
        .output()
        .expect("failed to run todoflow")
}

#[test]
fn add_persists_todo_with_defaults() {
    let store_path = temp_path("cli-add.json");

    let output = run(&store_path, &["add", "Buy milk"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added todo: Buy milk"));

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert_eq!(stored["schema_version"], 1);
    let todo = &stored["todos"][0];
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["priority"], "medium");
    assert_eq!(todo["completed"], false);
    assert!(todo["due_date"].is_null());
}

#[test]
fn add_with_json_prints_created_todo() {
    let store_path = temp_path("cli-add-json.json");

    let output = run(
        &store_path,
        &[
            "add",
            "Buy milk",
            "--priority",
            "high",
            "--due",
            "2025-12-24",
            "--description",
            "2 litres",
            "--json",
        ],
    );
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let printed: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(printed["title"], "Buy milk");
    assert_eq!(printed["priority"], "high");
    assert_eq!(printed["description"], "2 litres");
    assert_eq!(printed["due_date"], "2025-12-24T00:00:00Z");
}

#[test]
fn add_rejects_blank_title_without_touching_store() {
    let store_path = temp_path("cli-add-blank.json");

    let output = run(&store_path, &["add", "   "]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation_error"));
    assert!(!store_path.exists());
}

#[test]
fn add_rejects_unknown_priority() {
    let store_path = temp_path("cli-add-priority.json");

    let output = run(&store_path, &["add", "Buy milk", "--priority", "urgent"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("validation_error"));
    assert!(!store_path.exists());
}

#[test]
fn add_requires_a_signed_in_user() {
    let store_path = temp_path("cli-add-anon.json");

    let output = Command::new(env!("CARGO_BIN_EXE_todoflow"))
        .args(["add", "Buy milk"])
        .env("TODOFLOW_STORE_PATH", &store_path)
        .env("TODOFLOW_CONFIG_PATH", temp_path("missing-config.json"))
        .env_remove("TODOFLOW_USER")
        .output()
        .expect("failed to run todoflow");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: unauthenticated"));
    assert!(!store_path.exists());
}

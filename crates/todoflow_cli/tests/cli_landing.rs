use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todoflow-{nanos}-{file_name}"))
}

fn run_anonymous(args: &[&str], config_path: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_todoflow"))
        .args(args)
        .env("TODOFLOW_STORE_PATH", temp_path("landing-store.json"))
        .env("TODOFLOW_CONFIG_PATH", config_path)
        .env_remove("TODOFLOW_USER")
        .output()
        .expect("failed to run todoflow")
}

#[test]
fn signed_out_users_see_landing_page() {
    let output = run_anonymous(&[], &temp_path("missing-config.json"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("TodoFlow"));
    assert!(stdout.contains("Organize Your Life Beautifully"));
    assert!(stdout.contains("Lightning Fast"));
    assert!(stdout.contains("Get Started Free"));
    assert!(!stdout.contains("Welcome back"));
}

#[test]
fn landing_theme_comes_from_config() {
    let config_path = temp_path("landing-config.json");
    std::fs::write(&config_path, r#"{ "theme": "Dark Mode" }"#).unwrap();

    let output = run_anonymous(&["landing", "--json"], &config_path);
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(json["theme"], "noir");
    assert_eq!(json["headline"], "Organize Your Life Beautifully");
    assert_eq!(json["features"].as_array().unwrap().len(), 3);
}

#[test]
fn landing_theme_flag_wins_and_colors_output() {
    let output = run_anonymous(
        &["landing", "--theme", "solarized"],
        &temp_path("missing-config.json"),
    );

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\x1b[38;5;108m"));
}

#[test]
fn unknown_landing_theme_is_rejected() {
    let output = run_anonymous(
        &["landing", "--theme", "neon"],
        &temp_path("missing-config.json"),
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: validation_error - unknown theme"));
}

#[test]
fn dashboard_commands_require_sign_in() {
    let output = run_anonymous(&["list"], &temp_path("missing-config.json"));

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("ERROR: unauthenticated - sign in to continue")
    );
}

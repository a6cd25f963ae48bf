use assert_cmd::Command;
use predicates::prelude::*;

fn sysmetic(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("sysmetic").unwrap();
    cmd.env("SYSMETIC_HOME", home)
        .env_remove("SYSMETIC_API_URL")
        .env_remove("SYSMETIC_TOKEN")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn reversed_range_fails_before_any_request() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .args(["strategies", "--range", "10", "5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("start must be less than end"));
}

#[test]
fn out_of_bounds_range_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .args(["strategies", "--range", "-150", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("value out of bounds"));
}

#[test]
fn unknown_option_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .args(["strategies", "--period", "FOREVER"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an option of Operating period"));
}

#[test]
fn unreachable_server_reports_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .env("SYSMETIC_API_URL", "http://127.0.0.1:9")
        .args(["mine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn config_set_then_show() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .args(["config", "page_size", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set page_size = 25"));

    sysmetic(temp_dir.path())
        .args(["config", "page_size"])
        .assert()
        .success()
        .stdout(predicate::str::diff("25\n"));

    sysmetic(temp_dir.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url"))
        .stdout(predicate::str::contains("http://localhost:8080"));

    assert!(temp_dir.path().join("config.json").exists());
}

#[test]
fn config_rejects_bad_values() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .args(["config", "api_url", "localhost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url must start with"));

    sysmetic(temp_dir.path())
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn filters_lists_fields_and_tooltips() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .args(["filters", "algorithm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OFFENSIVE"))
        .stdout(predicate::str::contains("cumulative return / MDD"));

    sysmetic(temp_dir.path())
        .args(["filters", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown filter context"));
}

#[test]
fn questions_reject_unknown_status() {
    let temp_dir = tempfile::tempdir().unwrap();

    sysmetic(temp_dir.path())
        .args(["questions", "--status", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown status"));
}

#[test]
fn chart_keeps_recent_points() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("series.json");
    // 2024-01-01 and 2024-06-01, UTC midnight
    std::fs::write(
        &file,
        r#"{"primary": [[1704067200000, 1.5], [1717200000000, 4.25]], "secondary": []}"#,
    )
    .unwrap();

    sysmetic(temp_dir.path())
        .arg("chart")
        .arg(&file)
        .args(["--period", "1M", "--today", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-01"))
        .stdout(predicate::str::contains("2024-01-01").not());
}

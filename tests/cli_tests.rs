use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary run inside an isolated working directory with its own storage
fn reelpick(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reelpick").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("REELPICK_CONFIG")
        .env_remove("RUST_LOG")
        .env("REELPICK_STORAGE_DIR", dir.path().join("storage"))
        .env("REELPICK_PREVIEW_TEMP_ROOT", dir.path().join("tmp"));
    cmd
}

#[test]
fn test_config_prints_effective_toml() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .env("REELPICK_GRID_COLUMNS", "4")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("grid_columns = 4"))
        .stdout(predicate::str::contains("dir_name = \"video_previews\""));
}

#[test]
fn test_config_file_in_working_directory_is_used() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("reelpick.toml"),
        "[preview]\nmax_duration = 3.0\n",
    )
    .unwrap();
    reelpick(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_duration = 3.0"));
}

#[test]
fn test_invalid_env_value_fails() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .env("REELPICK_GRID_COLUMNS", "zero")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REELPICK_GRID_COLUMNS"));
}

#[test]
fn test_show_unknown_session_fails() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .args(["session", "show", "--task", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No session for task: missing"));
}

#[test]
fn test_list_without_sessions() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .args(["session", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions"));
}

#[test]
fn test_start_with_empty_library_reports_download_failure() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("material")).unwrap();
    reelpick(&dir)
        .args(["session", "start", "--task", "demo", "--terms", "city"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to download videos"));

    // The failed attempt is recorded, with no candidates
    reelpick(&dir)
        .args(["session", "show", "--task", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[no_session]"));
}

#[test]
fn test_invalid_task_id_rejected() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .args(["session", "show", "--task", "../etc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task id"));
}

#[test]
fn test_index_zero_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .args(["session", "toggle", "--task", "demo", "--index", "0"])
        .assert()
        .failure();
}

#[test]
fn test_reset_unknown_session() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .args(["session", "reset", "--task", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No session for task: demo"));
}

#[test]
fn test_preview_of_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    reelpick(&dir)
        .args(["preview", "--input", "absent.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not preview video"));
}

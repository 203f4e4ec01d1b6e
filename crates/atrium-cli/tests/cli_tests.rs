use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn atrium_cmd() -> Command {
    let mut cmd = Command::cargo_bin("atrium").expect("Failed to find atrium binary");
    cmd.arg("--no-color");
    cmd
}

fn create_task(db_arg: &str, thread_id: &str, todos: &str) {
    atrium_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "create",
            thread_id,
            "Quarterly report",
            "--plan",
            "Gather numbers, then write",
            "--todo",
            todos,
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_create_task_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atrium_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "task",
            "create",
            "thread-1",
            "Quarterly report",
            "--plan",
            "Gather numbers, then write",
            "--todo",
            "Gather numbers",
            "--todo",
            "Write",
            "--description",
            "For the board meeting",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 1"))
        .stdout(predicate::str::contains("# 1. Quarterly report"))
        .stdout(predicate::str::contains("For the board meeting"))
        .stdout(predicate::str::contains("1. Gather numbers"));
}

#[test]
fn test_cli_create_task_without_todos_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atrium_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "task",
            "create",
            "thread-1",
            "Empty",
            "--plan",
            "Nothing to do",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create task"));
}

#[test]
fn test_cli_show_without_active_task() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atrium_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "task", "show", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active task for thread 'quiet'."));
}

#[test]
fn test_cli_todo_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_task(db_arg, "thread-1", "Gather,Write");

    atrium_cmd()
        .args(["--database-file", db_arg, "task", "start", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started \"Gather\""));

    atrium_cmd()
        .args(["--database-file", db_arg, "task", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now working on \"Write\""));

    atrium_cmd()
        .args(["--database-file", db_arg, "task", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All todos completed (2/2)"));

    atrium_cmd()
        .args(["--database-file", db_arg, "task", "show", "thread-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active task"));
}

#[test]
fn test_cli_update_replaces_open_todos() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_task(db_arg, "thread-1", "Gather,Write,Proofread");

    atrium_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "update",
            "thread-1",
            "--plan",
            "Skip proofreading",
            "--todos",
            "Write draft",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes made:"))
        .stdout(predicate::str::contains("Write draft"))
        .stdout(predicate::str::contains("Proofread").not());
}

#[test]
fn test_cli_update_without_active_task_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atrium_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "task",
            "update",
            "nobody",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No active task found for thread 'nobody'",
        ));
}

#[test]
fn test_cli_start_missing_task_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    atrium_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "task", "start", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with ID 42 not found"));
}

#[test]
fn test_cli_history_lists_newest_first() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    create_task(db_arg, "thread-1", "First");
    create_task(db_arg, "thread-1", "Second");

    let output = atrium_cmd()
        .args(["--database-file", db_arg, "task", "history", "thread-1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();

    let newest = text.find("(ID: 2)").expect("second task listed");
    let oldest = text.find("(ID: 1)").expect("first task listed");
    assert!(newest < oldest);
}

#[test]
fn test_cli_path_with_map() {
    atrium_cmd()
        .args(["path", "-5", "-5", "5", "5", "--map"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Route with"))
        .stdout(predicate::str::contains("S"))
        .stdout(predicate::str::contains("G"))
        .stdout(predicate::str::contains("% walkable"));
}

#[test]
fn test_cli_path_blocked_by_wall() {
    let temp_dir = create_cli_test_environment();
    let floor_path = temp_dir.path().join("floor.json");
    std::fs::write(
        &floor_path,
        r#"{
            "floor_size": 20.0,
            "obstacles": [
                {
                    "name": "wall",
                    "kind": "generic",
                    "bounds": {
                        "min": { "x": -10.0, "z": -0.1 },
                        "max": { "x": 10.0, "z": 0.1 }
                    }
                }
            ]
        }"#,
    )
    .unwrap();

    atrium_cmd()
        .args(["path", "0", "-6", "0", "6", "--floor", floor_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path found"));
}

#[test]
fn test_cli_path_missing_floor_file_fails() {
    atrium_cmd()
        .args(["path", "0", "0", "1", "1", "--floor", "/nonexistent/floor.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load floor plan"));
}

#[test]
fn test_cli_layout_cluster() {
    atrium_cmd()
        .args(["layout", "4", "--x", "10", "--z", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Cluster of 4 desks at (10, -5)"))
        .stdout(predicate::str::contains("Desk 3:"));
}

#[test]
fn test_cli_layout_empty_cluster() {
    atrium_cmd()
        .args(["layout", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No desks in this cluster."));
}

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn daymark_cmd() -> Command {
    let mut cmd = Command::cargo_bin("daymark").expect("Failed to find daymark binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_post_plain_message() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    daymark_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "message",
            "post",
            "Hello there",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted message with ID: 1"))
        .stdout(predicate::str::contains("Hello there"));
}

#[test]
fn test_cli_post_message_with_plan_renders_widget() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    daymark_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "message",
            "post",
            "Here is your plan:",
            "--author",
            "assistant",
            "--plan",
            r#"{"tasks": ["A", "B"]}"#,
            "--date",
            "2024-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(plan attached)"))
        .stdout(predicate::str::contains("Plan for 2024-06-01"))
        .stdout(predicate::str::contains("<<<PLAN_MY_DAY_JSON>>>").not());
}

#[test]
fn test_cli_post_rejects_invalid_date() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    daymark_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "message",
            "post",
            "text",
            "--plan",
            "{}",
            "--date",
            "June 1st",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_cli_post_rejects_date_without_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    daymark_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "message",
            "post",
            "text",
            "--date",
            "2024-06-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target_date"));
}

#[test]
fn test_cli_list_empty_messages() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    daymark_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "message",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages found."));
}

#[test]
fn test_cli_list_marks_plan_bearing_messages() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    daymark_cmd()
        .args(["--database-file", db, "message", "post", "plain one"])
        .assert()
        .success();

    daymark_cmd()
        .args([
            "--database-file",
            db,
            "message",
            "post",
            "with plan",
            "--plan",
            r#"{"tasks": []}"#,
            "--date",
            "2024-06-01",
        ])
        .assert()
        .success();

    daymark_cmd()
        .args(["--database-file", db, "message", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plain one"))
        .stdout(predicate::str::contains("with plan"))
        .stdout(predicate::str::contains("Plan attached (target 2024-06-01)"))
        .stdout(predicate::str::contains("<<<PLAN_MY_DAY_JSON>>>").not());
}

#[test]
fn test_cli_show_missing_message() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    daymark_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "message",
            "show",
            "99",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Message with ID 99 not found"));
}

#[test]
fn test_cli_edit_drops_attached_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    daymark_cmd()
        .args([
            "--database-file",
            db,
            "message",
            "post",
            "planned",
            "--plan",
            r#"{"tasks": ["A"]}"#,
        ])
        .assert()
        .success();

    daymark_cmd()
        .args(["--database-file", db, "message", "edit", "1", "replaced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated message with ID: 1"))
        .stdout(predicate::str::contains("replaced"));

    daymark_cmd()
        .args(["--database-file", db, "message", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Plan").not());
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    daymark_cmd()
        .args(["--database-file", db, "message", "post", "doomed"])
        .assert()
        .success();

    daymark_cmd()
        .args(["--database-file", db, "message", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmation"));

    daymark_cmd()
        .args(["--database-file", db, "message", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Permanently deleted message with ID: 1"));

    daymark_cmd()
        .args(["--database-file", db, "message", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_cli_default_command_lists_feed() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    daymark_cmd()
        .args(["--database-file", db_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages found."));
}

#[test]
fn test_cli_codec_encode_prints_marker_block() {
    daymark_cmd()
        .args([
            "codec",
            "encode",
            "Here is your plan:",
            "--plan",
            r#"{"tasks": ["A"]}"#,
            "--date",
            "2024-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Here is your plan:"))
        .stdout(predicate::str::contains("<<<PLAN_MY_DAY_JSON>>>"))
        .stdout(predicate::str::contains("<<<END_PLAN_MY_DAY_JSON>>>"))
        .stdout(predicate::str::contains("2024-06-01"));
}

#[test]
fn test_cli_codec_encode_requires_a_plan() {
    daymark_cmd()
        .args(["codec", "encode", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--plan"));
}

#[test]
fn test_cli_codec_decode_round_trip_via_stdin() {
    let encoded = daymark_cmd()
        .args([
            "codec",
            "encode",
            "Tomorrow:",
            "--plan",
            r#"{"tasks": ["A"]}"#,
            "--date",
            "2030-01-01",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    daymark_cmd()
        .args(["codec", "decode"])
        .write_stdin(encoded)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tomorrow:"))
        .stdout(predicate::str::contains("Target date: 2030-01-01"))
        .stdout(predicate::str::contains("tasks"));
}

#[test]
fn test_cli_codec_decode_reports_absent_payload() {
    daymark_cmd()
        .args(["codec", "decode"])
        .write_stdin("just some text")
        .assert()
        .success()
        .stdout(predicate::str::contains("just some text"))
        .stdout(predicate::str::contains("No payload block."));
}

#[test]
fn test_cli_codec_decode_from_file_reports_malformed_block() {
    let temp_dir = create_cli_test_environment();
    let path = temp_dir.path().join("content.txt");
    std::fs::write(&path, "keep this\n<<<PLAN_MY_DAY_JSON>>>").unwrap();

    daymark_cmd()
        .args(["codec", "decode", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep this"))
        .stdout(predicate::str::contains("unterminated"));
}

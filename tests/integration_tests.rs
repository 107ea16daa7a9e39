use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{rollcall, sandbox};

#[test]
fn init_creates_the_database() {
    let sb = sandbox("init_creates_db");

    rollcall()
        .env("HOME", &sb.home)
        .args(["--db", sb.db_path.to_str().unwrap(), "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(sb.db_path.exists());
}

#[test]
fn issue_publishes_an_active_code_and_appends_history() {
    let sb = sandbox("issue_publishes");
    let data = sb.data_dir.to_str().unwrap().to_string();

    rollcall()
        .env("HOME", &sb.home)
        .args(["--data-dir", &data, "issue"])
        .assert()
        .success()
        .stdout(contains("Attendance code for this session"));

    let active: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(sb.data_dir.join("active_code.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(active["code"].as_str().unwrap().len(), 6);

    rollcall()
        .env("HOME", &sb.home)
        .args(["--data-dir", &data, "issue"])
        .assert()
        .success();

    let history: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(sb.data_dir.join("codes_history.json")).unwrap(),
    )
    .unwrap();
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);

    // The newest history entry is the currently active code.
    let active: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(sb.data_dir.join("active_code.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(history[1]["code"], active["code"]);
}

fn mark_args(code: &str) -> Vec<String> {
    [
        "mark",
        "--roll",
        "R100",
        "--password",
        "alicepw",
        "--lat",
        "11.00314",
        "--lon",
        "76.20058",
        "--code",
        code,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn mark_flow_appends_one_row_then_rejects_duplicates() {
    let sb = sandbox("mark_flow");
    sb.write_config();
    sb.write_students();
    sb.write_active_code("654321", 1);

    rollcall()
        .env("HOME", &sb.home)
        .args(mark_args("654321"))
        .assert()
        .success()
        .stdout(contains("Attendance marked successfully!"));

    assert_eq!(sb.attendance_rows(), 1);
    assert_eq!(sb.snapshot_count(), 1);

    // Identical attempt: idempotent rejection, no new row, exit 0.
    rollcall()
        .env("HOME", &sb.home)
        .args(mark_args("654321"))
        .assert()
        .success()
        .stdout(contains("Attendance already marked!"));

    assert_eq!(sb.attendance_rows(), 1);

    // A different code on the same date goes through.
    sb.write_active_code("999888", 0);
    rollcall()
        .env("HOME", &sb.home)
        .args(mark_args("999888"))
        .assert()
        .success()
        .stdout(contains("Attendance marked successfully!"));

    assert_eq!(sb.attendance_rows(), 2);
}

#[test]
fn mark_fails_on_wrong_password() {
    let sb = sandbox("mark_wrong_password");
    sb.write_config();
    sb.write_students();
    sb.write_active_code("654321", 1);

    rollcall()
        .env("HOME", &sb.home)
        .args([
            "mark", "--roll", "R100", "--password", "nope", "--lat", "11.00314", "--lon",
            "76.20058", "--code", "654321",
        ])
        .assert()
        .failure()
        .stderr(contains("Login failed"));

    assert_eq!(sb.attendance_rows(), 0);
}

#[test]
fn mark_fails_outside_the_classroom_radius() {
    let sb = sandbox("mark_out_of_radius");
    sb.write_config();
    sb.write_students();
    sb.write_active_code("654321", 1);

    rollcall()
        .env("HOME", &sb.home)
        .args([
            "mark", "--roll", "R100", "--password", "alicepw", "--lat", "11.1", "--lon",
            "76.20058", "--code", "654321",
        ])
        .assert()
        .failure()
        .stderr(contains("Too far from the classroom"));

    assert_eq!(sb.attendance_rows(), 0);
}

#[test]
fn mark_fails_on_an_expired_code() {
    let sb = sandbox("mark_expired");
    sb.write_config();
    sb.write_students();
    sb.write_active_code("111222", 10);

    rollcall()
        .env("HOME", &sb.home)
        .args(mark_args("111222"))
        .assert()
        .failure()
        .stderr(contains("Code has expired"));

    assert_eq!(sb.attendance_rows(), 0);
}

#[test]
fn mark_fails_on_a_wrong_code() {
    let sb = sandbox("mark_wrong_code");
    sb.write_config();
    sb.write_students();
    sb.write_active_code("111222", 1);

    rollcall()
        .env("HOME", &sb.home)
        .args(mark_args("999999"))
        .assert()
        .failure()
        .stderr(contains("Wrong code"));

    assert_eq!(sb.attendance_rows(), 0);
}

#[test]
fn mark_fails_without_a_registry() {
    let sb = sandbox("mark_no_registry");
    sb.write_config();
    sb.write_active_code("654321", 1);

    rollcall()
        .env("HOME", &sb.home)
        .args(mark_args("654321"))
        .assert()
        .failure()
        .stderr(contains("Student registry not found"));
}

#[test]
fn view_prints_ledger_rows_with_period_filtering() {
    let sb = sandbox("view_rows");
    sb.write_ledger_fixture();
    let data = sb.data_dir.to_str().unwrap().to_string();

    rollcall()
        .env("HOME", &sb.home)
        .args(["--data-dir", &data, "view"])
        .assert()
        .success()
        .stdout(contains("R100"))
        .stdout(contains("R101"));

    rollcall()
        .env("HOME", &sb.home)
        .args(["--data-dir", &data, "view", "--period", "2024-01"])
        .assert()
        .success()
        .stdout(contains("R100"))
        .stdout(contains("R101").not());
}

#[test]
fn view_reports_an_empty_ledger() {
    let sb = sandbox("view_empty");
    let data = sb.data_dir.to_str().unwrap().to_string();

    rollcall()
        .env("HOME", &sb.home)
        .args(["--data-dir", &data, "view"])
        .assert()
        .success()
        .stdout(contains("No attendance records found."));
}

#[test]
fn db_import_feeds_info_and_the_internal_log() {
    let sb = sandbox("db_import");
    sb.write_students();
    let db = sb.db_path.to_str().unwrap().to_string();
    let students = sb.data_dir.join("students.json");

    rollcall()
        .env("HOME", &sb.home)
        .args(["--db", &db, "db", "--import", students.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Imported 2 students"));

    rollcall()
        .env("HOME", &sb.home)
        .args(["--db", &db, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migrations up to date."));

    rollcall()
        .env("HOME", &sb.home)
        .args(["--db", &db, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Students registered : 2"));

    rollcall()
        .env("HOME", &sb.home)
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("import"));
}

#[test]
fn backup_copies_and_compresses_data_files() {
    let sb = sandbox("backup_files");
    sb.write_students();
    sb.write_active_code("654321", 1);
    sb.write_ledger_fixture();
    let data = sb.data_dir.to_str().unwrap().to_string();

    let dest_dir = sb.home.join("bk");
    rollcall()
        .env("HOME", &sb.home)
        .args(["--data-dir", &data, "backup", "--file", dest_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(dest_dir.join("attendance.csv").is_file());
    assert!(dest_dir.join("students.json").is_file());

    let archive = sb.home.join("bk.zip");
    rollcall()
        .env("HOME", &sb.home)
        .args([
            "--data-dir",
            &data,
            "backup",
            "--file",
            archive.to_str().unwrap(),
            "--compress",
        ])
        .assert()
        .success()
        .stdout(contains("Compressed backup"));

    assert!(archive.is_file());
    assert!(fs::metadata(&archive).unwrap().len() > 0);
}

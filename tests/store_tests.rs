//! Direct tests for the file-backed stores: codes, registry, ledger,
//! snapshots.

use chrono::NaiveDate;
use rollcall::errors::AppError;
use rollcall::models::active_code::ActiveCode;
use rollcall::models::attendance::AttendanceRecord;
use rollcall::snapshot::SnapshotStore;
use rollcall::store::codes::CodeStore;
use rollcall::store::ledger::CsvLedger;
use rollcall::store::registry::Registry;
use std::fs;
use tempfile::TempDir;

mod common;

fn ts(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn publishing_supersedes_the_active_code_and_grows_the_history() {
    let tmp = TempDir::new().unwrap();
    let store = CodeStore::from_paths(
        tmp.path().join("active_code.json"),
        tmp.path().join("codes_history.json"),
    );

    assert!(store.load_active().unwrap().is_none());

    let first = ActiveCode::new("111111".to_string(), ts(9, 0, 0));
    store.publish(&first).unwrap();
    assert_eq!(store.load_active().unwrap(), Some(first.clone()));

    let second = ActiveCode::new("222222".to_string(), ts(10, 0, 0));
    store.publish(&second).unwrap();

    assert_eq!(store.load_active().unwrap(), Some(second.clone()));
    assert_eq!(store.history().unwrap(), vec![first, second]);
}

fn registry_fixture(tmp: &TempDir) -> Registry {
    let path = tmp.path().join("students.json");
    fs::write(
        &path,
        r#"[{"roll_no": "R100", "name": "Alice Johnson", "password": "alicepw"}]"#,
    )
    .unwrap();
    Registry::new(path)
}

#[test]
fn authentication_needs_the_exact_roll_and_password() {
    let tmp = TempDir::new().unwrap();
    let reg = registry_fixture(&tmp);

    let found = reg.authenticate("R100", "alicepw").unwrap();
    assert_eq!(found.map(|s| s.name), Some("Alice Johnson".to_string()));

    assert!(reg.authenticate("R100", "wrong").unwrap().is_none());
    assert!(reg.authenticate("r100", "alicepw").unwrap().is_none());
}

#[test]
fn identity_check_ignores_name_case_but_not_roll_case() {
    let tmp = TempDir::new().unwrap();
    let reg = registry_fixture(&tmp);

    assert!(reg.verify_identity("R100", "alice johnson").unwrap());
    assert!(reg.verify_identity("R100", "ALICE JOHNSON").unwrap());
    assert!(!reg.verify_identity("r100", "Alice Johnson").unwrap());
    assert!(!reg.verify_identity("R100", "Someone Else").unwrap());
}

#[test]
fn missing_registry_is_reported_as_such() {
    let tmp = TempDir::new().unwrap();
    let reg = Registry::new(tmp.path().join("nowhere.json"));

    let err = reg.authenticate("R100", "pw").unwrap_err();
    assert!(matches!(err, AppError::RegistryNotFound(_)));
}

fn record(code: &str, at: chrono::NaiveDateTime) -> AttendanceRecord {
    AttendanceRecord::new(
        at,
        "R100".to_string(),
        "Alice Johnson".to_string(),
        code.to_string(),
        format!("R100_{}.jpg", at.format("%Y%m%d_%H%M%S")),
    )
}

#[test]
fn ledger_rejects_the_same_date_roll_code_triple() {
    let tmp = TempDir::new().unwrap();
    let ledger = CsvLedger::new(tmp.path().join("attendance.csv"));

    ledger.append(&record("123456", ts(9, 0, 0))).unwrap();

    // Same (date, roll, code), later in the day → duplicate.
    let err = ledger.append(&record("123456", ts(9, 5, 0))).unwrap_err();
    assert!(matches!(err, AppError::DuplicateAttendance));

    // Different code on the same date → accepted.
    ledger.append(&record("654321", ts(11, 0, 0))).unwrap();

    let records = ledger.records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].code, "123456");
    assert_eq!(records[1].code, "654321");
}

#[test]
fn ledger_creates_its_header_lazily() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("attendance.csv");
    let ledger = CsvLedger::new(path.clone());

    assert!(!path.exists());
    assert!(ledger.records().unwrap().is_empty());

    ledger.append(&record("123456", ts(9, 0, 0))).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Date,Roll No,Name,Code,Timestamp,Snapshot"));
}

#[test]
fn ledger_round_trips_timestamps_at_second_precision() {
    let tmp = TempDir::new().unwrap();
    let ledger = CsvLedger::new(tmp.path().join("attendance.csv"));

    let at = ts(14, 30, 45);
    ledger.append(&record("123456", at)).unwrap();

    let records = ledger.records().unwrap();
    assert_eq!(records[0].marked_at, at);
    assert_eq!(records[0].date, at.date());
}

#[test]
fn snapshots_are_named_from_roll_and_timestamp() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("snapshots");
    let store = SnapshotStore::new(dir.clone());

    assert_eq!(
        SnapshotStore::filename_for("R100", ts(9, 5, 7)),
        "R100_20240101_090507.jpg"
    );

    // Directory is created on demand.
    assert!(!dir.exists());
    let name = store
        .save("R100", ts(9, 5, 7), &common::fixture_png())
        .unwrap();
    assert!(store.path_of(&name).is_file());
}

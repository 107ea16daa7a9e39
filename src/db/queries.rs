use crate::errors::AppResult;
use crate::models::student::Student;
use crate::utils::date::TIMESTAMP_FMT;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Placeholder until classes carry a real teacher reference.
pub const TEACHER_ID_PLACEHOLDER: i64 = 1;

fn map_student(row: &Row) -> rusqlite::Result<(i64, Student)> {
    Ok((
        row.get("id")?,
        Student {
            roll_no: row.get("roll_no")?,
            name: row.get("name")?,
            password: row.get("password")?,
            device_token: row.get("device_token")?,
        },
    ))
}

/// Exact roll-number lookup; returns the row id alongside the record.
pub fn find_student_by_roll(
    conn: &Connection,
    roll_no: &str,
) -> AppResult<Option<(i64, Student)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, roll_no, name, password, device_token
         FROM students WHERE roll_no = ?1",
    )?;

    Ok(stmt.query_row([roll_no], map_student).optional()?)
}

/// Upsert one registry entry by roll number.
pub fn upsert_student(conn: &Connection, s: &Student) -> AppResult<()> {
    conn.execute(
        "INSERT INTO students (roll_no, name, password, device_token)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(roll_no) DO UPDATE SET
             name = excluded.name,
             password = excluded.password,
             device_token = excluded.device_token",
        params![s.roll_no, s.name, s.password, s.device_token],
    )?;
    Ok(())
}

/// Load the console registry into the `students` table.
pub fn import_students(conn: &Connection, students: &[Student]) -> AppResult<usize> {
    for s in students {
        upsert_student(conn, s)?;
    }
    Ok(students.len())
}

/// Insert one attendance row. Returns false when the UNIQUE constraint on
/// (date, student_id, class_code) swallowed the insert, i.e. the attempt
/// was a duplicate.
#[allow(clippy::too_many_arguments)]
pub fn insert_attendance(
    conn: &Connection,
    student_id: i64,
    teacher_id: i64,
    date: NaiveDate,
    class_code: &str,
    gps_lat: f64,
    gps_lon: f64,
    snapshot_file: &str,
    marked_at: NaiveDateTime,
) -> AppResult<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO attendance
             (student_id, teacher_id, date, class_code, gps_lat, gps_lon, snapshot_file, marked_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            student_id,
            teacher_id,
            date.format("%Y-%m-%d").to_string(),
            class_code,
            gps_lat,
            gps_lon,
            snapshot_file,
            marked_at.format(TIMESTAMP_FMT).to_string(),
        ],
    )?;

    Ok(inserted > 0)
}

/// Number of attendance rows for one date, used by `db --info`.
pub fn attendance_count_for_date(conn: &Connection, date: NaiveDate) -> AppResult<i64> {
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM attendance WHERE date = ?1")?;
    let count =
        stmt.query_row([date.format("%Y-%m-%d").to_string()], |row| row.get(0))?;
    Ok(count)
}

pub fn attendance_total(conn: &Connection) -> AppResult<i64> {
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM attendance")?;
    Ok(stmt.query_row([], |row| row.get(0))?)
}

pub fn student_total(conn: &Connection) -> AppResult<i64> {
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM students")?;
    Ok(stmt.query_row([], |row| row.get(0))?)
}

use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `students` table.
fn create_students_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            roll_no      TEXT NOT NULL UNIQUE,
            name         TEXT NOT NULL,
            password     TEXT NOT NULL,
            device_token TEXT UNIQUE
        );
        "#,
    )?;
    Ok(())
}

/// Create the `attendance` table. The UNIQUE constraint over
/// (date, student_id, class_code) is what makes the duplicate check atomic:
/// a conflicting insert affects zero rows instead of racing a prior scan.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id    INTEGER NOT NULL REFERENCES students(id),
            teacher_id    INTEGER NOT NULL DEFAULT 1,
            date          TEXT NOT NULL,
            class_code    TEXT NOT NULL,
            gps_lat       REAL NOT NULL,
            gps_lon       REAL NOT NULL,
            snapshot_file TEXT NOT NULL,
            marked_at     TEXT NOT NULL,
            UNIQUE(date, student_id, class_code)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
        "#,
    )?;
    Ok(())
}

/// Older databases predate the `device_token` column.
fn migrate_add_device_token_column(conn: &Connection) -> Result<()> {
    let version = "20250512_0001_add_device_token";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    let mut cols = conn.prepare("PRAGMA table_info('students')")?;
    let has_column = cols
        .query_map([], |row| row.get::<_, String>(1))?
        .filter_map(|c| c.ok())
        .any(|c| c == "device_token");

    if !has_column {
        conn.execute("ALTER TABLE students ADD COLUMN device_token TEXT", [])?;
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added device_token to students')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'device_token' to students table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create missing tables
    let students_existed = table_exists(conn, "students")?;

    if !students_existed {
        create_students_table(conn)?;
    }
    create_attendance_table(conn)?;

    // 3) Column-level upgrades for pre-existing schemas
    if students_existed {
        migrate_add_device_token_column(conn)?;
    }

    Ok(())
}

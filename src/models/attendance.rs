use crate::utils::date::TIMESTAMP_FMT;
use chrono::{NaiveDate, NaiveDateTime};

/// One row of the attendance ledger. Append-only: records are never updated
/// or deleted once written.
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub date: NaiveDate,          // ⇔ CSV "Date" / attendance.date ("YYYY-MM-DD")
    pub roll_no: String,          // ⇔ CSV "Roll No"
    pub name: String,             // ⇔ CSV "Name"
    pub code: String,             // ⇔ CSV "Code"
    pub marked_at: NaiveDateTime, // ⇔ CSV "Timestamp" (second precision)
    pub snapshot: String,         // ⇔ CSV "Snapshot" (stored filename)
}

impl AttendanceRecord {
    pub fn new(
        marked_at: NaiveDateTime,
        roll_no: String,
        name: String,
        code: String,
        snapshot: String,
    ) -> Self {
        Self {
            date: marked_at.date(),
            roll_no,
            name,
            code,
            marked_at,
            snapshot,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn marked_at_str(&self) -> String {
        self.marked_at.format(TIMESTAMP_FMT).to_string()
    }
}

//! Append-only attendance ledger backed by `attendance.csv`.

use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::utils::date::TIMESTAMP_FMT;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::OpenOptions;
use std::path::PathBuf;

const HEADER: [&str; 6] = ["Date", "Roll No", "Name", "Code", "Timestamp", "Snapshot"];

pub struct CsvLedger {
    file: PathBuf,
}

impl CsvLedger {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    /// Create the file with its header row on first use.
    fn ensure_header(&self) -> AppResult<()> {
        if self.file.exists() {
            return Ok(());
        }

        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut wtr = csv::Writer::from_path(&self.file)?;
        wtr.write_record(HEADER)?;
        wtr.flush()?;
        Ok(())
    }

    /// Scan the ledger for an existing (date, roll_no, code) row.
    pub fn is_duplicate(&self, date: NaiveDate, roll_no: &str, code: &str) -> AppResult<bool> {
        if !self.file.exists() {
            return Ok(false);
        }

        let date_str = date.format("%Y-%m-%d").to_string();
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.file)?;

        for row in rdr.records() {
            let row = row?;
            if row.get(0) == Some(date_str.as_str())
                && row.get(1) == Some(roll_no)
                && row.get(3) == Some(code)
            {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Append one record. Rejects a (date, roll_no, code) duplicate before
    /// writing; the append itself is a single flushed row.
    pub fn append(&self, rec: &AttendanceRecord) -> AppResult<()> {
        self.ensure_header()?;

        if self.is_duplicate(rec.date, &rec.roll_no, &rec.code)? {
            return Err(AppError::DuplicateAttendance);
        }

        let file = OpenOptions::new().append(true).open(&self.file)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        wtr.write_record([
            rec.date_str().as_str(),
            rec.roll_no.as_str(),
            rec.name.as_str(),
            rec.code.as_str(),
            rec.marked_at_str().as_str(),
            rec.snapshot.as_str(),
        ])?;
        wtr.flush()?;

        Ok(())
    }

    /// All ledger rows, in file order. An absent ledger reads as empty.
    pub fn records(&self) -> AppResult<Vec<AttendanceRecord>> {
        if !self.file.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.file)?;

        let mut out = Vec::new();
        for row in rdr.records() {
            let row = row?;

            let date_raw = row.get(0).unwrap_or_default();
            let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(date_raw.to_string()))?;

            let ts_raw = row.get(4).unwrap_or_default();
            let marked_at = NaiveDateTime::parse_from_str(ts_raw, TIMESTAMP_FMT)
                .map_err(|_| AppError::InvalidDate(ts_raw.to_string()))?;

            out.push(AttendanceRecord {
                date,
                roll_no: row.get(1).unwrap_or_default().to_string(),
                name: row.get(2).unwrap_or_default().to_string(),
                code: row.get(3).unwrap_or_default().to_string(),
                marked_at,
                snapshot: row.get(5).unwrap_or_default().to_string(),
            });
        }

        Ok(out)
    }
}

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::store::ledger::CsvLedger;
use crate::ui::messages::{info, warning};
use crate::utils::date::parse_period;
use crate::utils::path::is_absolute;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Flat row shape for CSV / JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub date: String,
    pub roll_no: String,
    pub name: String,
    pub code: String,
    pub marked_at: String,
    pub snapshot: String,
}

impl From<&AttendanceRecord> for RecordExport {
    fn from(rec: &AttendanceRecord) -> Self {
        Self {
            date: rec.date_str(),
            roll_no: rec.roll_no.clone(),
            name: rec.name.clone(),
            code: rec.code.clone(),
            marked_at: rec.marked_at_str(),
            snapshot: rec.snapshot.clone(),
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export ledger records.
    ///
    /// - `format`: "csv" | "json"
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"`, or a period expression
    pub fn export(
        cfg: &Config,
        format: &str,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let fmt = format.to_lowercase();
        if !["csv", "json"].contains(&fmt.as_str()) {
            return Err(AppError::Export(format!(
                "Unsupported format '{}'. Use one of: csv, json",
                format
            )));
        }

        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let path = Path::new(file);
        ensure_writable(path, force)?;

        let bounds = match range.as_deref() {
            None | Some("all") => None,
            Some(r) => Some(parse_period(r)?),
        };

        let rows: Vec<RecordExport> = CsvLedger::new(cfg.attendance_file())
            .records()?
            .iter()
            .filter(|rec| match bounds {
                Some((start, end)) => rec.date >= start && rec.date <= end,
                None => true,
            })
            .map(RecordExport::from)
            .collect();

        match fmt.as_str() {
            "csv" => write_csv(file, &rows)?,
            _ => write_json(file, &rows)?,
        }

        Ok(())
    }
}

fn write_csv(path: &str, rows: &[RecordExport]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // serialize() emits the header from field names; an empty export still
    // needs one.
    if rows.is_empty() {
        wtr.write_record(["date", "roll_no", "name", "code", "marked_at", "snapshot"])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_json(path: &str, rows: &[RecordExport]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Check whether a file may be created or overwritten.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask the user.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".to_string(),
        ))
    }
}

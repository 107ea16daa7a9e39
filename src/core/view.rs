use crate::config::Config;
use crate::errors::AppResult;
use crate::store::ledger::CsvLedger;
use crate::utils::date::parse_period;
use crate::utils::table::Table;

pub struct ViewLogic;

impl ViewLogic {
    /// Render the ledger as an aligned table, optionally filtered by a
    /// period expression (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or ranges).
    /// Returns None when no record matches.
    pub fn render(cfg: &Config, period: &Option<String>) -> AppResult<Option<String>> {
        let records = CsvLedger::new(cfg.attendance_file()).records()?;

        let bounds = match period.as_deref() {
            None | Some("all") => None,
            Some(p) => Some(parse_period(p)?),
        };

        let mut table = Table::new(vec![
            "Date",
            "Roll No",
            "Name",
            "Code",
            "Timestamp",
            "Snapshot",
        ]);

        for rec in records {
            if let Some((start, end)) = bounds
                && (rec.date < start || rec.date > end)
            {
                continue;
            }

            table.add_row(vec![
                rec.date_str(),
                rec.roll_no.clone(),
                rec.name.clone(),
                rec.code.clone(),
                rec.marked_at_str(),
                rec.snapshot.clone(),
            ]);
        }

        if table.is_empty() {
            Ok(None)
        } else {
            Ok(Some(table.render()))
        }
    }
}

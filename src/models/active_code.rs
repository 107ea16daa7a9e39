use crate::errors::{AppError, AppResult};
use crate::utils::date::TIMESTAMP_FMT;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The single currently valid attendance code together with its issuance
/// time. Serialized verbatim as `{"code": "...", "time": "..."}` in both
/// `active_code.json` and every `codes_history.json` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveCode {
    pub code: String,
    /// Issuance timestamp, second precision ("YYYY-MM-DD HH:MM:SS").
    pub time: String,
}

impl ActiveCode {
    pub fn new(code: String, issued_at: NaiveDateTime) -> Self {
        Self {
            code,
            time: issued_at.format(TIMESTAMP_FMT).to_string(),
        }
    }

    pub fn issued_at(&self) -> AppResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.time, TIMESTAMP_FMT)
            .map_err(|_| AppError::InvalidDate(self.time.clone()))
    }
}

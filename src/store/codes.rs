//! Active-code store: one overwritten current value plus an append-only
//! history, both JSON files in the data directory.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::active_code::ActiveCode;
use std::fs;
use std::path::PathBuf;

/// Owns the `active_code.json` / `codes_history.json` pair. The current
/// code is a single-writer record: publishing a new code supersedes the
/// previous one, while the history is only ever appended to.
pub struct CodeStore {
    active_file: PathBuf,
    history_file: PathBuf,
}

impl CodeStore {
    pub fn new(cfg: &Config) -> Self {
        Self {
            active_file: cfg.active_code_file(),
            history_file: cfg.history_file(),
        }
    }

    pub fn from_paths(active_file: PathBuf, history_file: PathBuf) -> Self {
        Self {
            active_file,
            history_file,
        }
    }

    /// The currently published code, or None if no code was ever issued.
    pub fn load_active(&self) -> AppResult<Option<ActiveCode>> {
        if !self.active_file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.active_file)?;
        let active: ActiveCode = serde_json::from_str(&content)
            .map_err(|e| AppError::Other(format!("corrupt active code file: {e}")))?;
        Ok(Some(active))
    }

    /// Overwrite the active code, then append it to the history. There is
    /// no rollback: if the history write fails after the active write
    /// succeeded, the two files diverge and the error is surfaced as-is.
    pub fn publish(&self, code: &ActiveCode) -> AppResult<()> {
        if let Some(parent) = self.active_file.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.active_file, serde_json::to_string(code).map_err(to_app)?)?;

        let mut history = self.history().unwrap_or_default();
        history.push(code.clone());
        fs::write(
            &self.history_file,
            serde_json::to_string_pretty(&history).map_err(to_app)?,
        )?;

        Ok(())
    }

    /// All codes ever issued, oldest first. A missing or unreadable history
    /// file reads as empty, matching the lenient append behaviour.
    pub fn history(&self) -> AppResult<Vec<ActiveCode>> {
        if !self.history_file.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.history_file)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }
}

fn to_app(e: serde_json::Error) -> AppError {
    AppError::Other(e.to_string())
}

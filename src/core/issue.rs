use crate::config::Config;
use crate::core::code::generate_code;
use crate::errors::AppResult;
use crate::models::active_code::ActiveCode;
use crate::store::codes::CodeStore;
use crate::utils::date;

pub struct IssueLogic;

impl IssueLogic {
    /// Generate a fresh code and publish it, superseding the previous one.
    pub fn issue(cfg: &Config) -> AppResult<ActiveCode> {
        let active = ActiveCode::new(generate_code(), date::now());
        CodeStore::new(cfg).publish(&active)?;
        Ok(active)
    }
}

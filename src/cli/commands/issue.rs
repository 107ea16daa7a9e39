use crate::config::Config;
use crate::core::issue::IssueLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let active = IssueLogic::issue(cfg)?;

    success(format!(
        "Attendance code for this session: {} (valid {} minutes)",
        active.code, cfg.code_validity_minutes
    ));

    Ok(())
}

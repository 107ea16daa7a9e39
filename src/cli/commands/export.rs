use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        ExportLogic::export(cfg, format, file, range, *force)?;
        success(format!(
            "{} export completed: {}",
            format.to_uppercase(),
            file
        ));
    }
    Ok(())
}

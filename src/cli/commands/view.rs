use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::ViewLogic;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::View { period } = cmd {
        println!("📌 Attendance Records:\n");

        match ViewLogic::render(cfg, period)? {
            Some(table) => println!("{table}"),
            None => warning("No attendance records found."),
        }
    }

    Ok(())
}

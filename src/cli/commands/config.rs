use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::env;
use std::fs;
use std::process::Command;

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if path.exists() {
                println!("📄 {}\n", path.display());
                println!("{}", fs::read_to_string(&path)?);
            } else {
                warning(format!(
                    "No configuration file found at {} (run `rollcall init`)",
                    path.display()
                ));
            }
            return Ok(());
        }

        if *edit_config {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "No configuration file at {} (run `rollcall init` first)",
                    path.display()
                )));
            }

            let chosen = editor
                .clone()
                .or_else(|| env::var("EDITOR").ok())
                .or_else(|| env::var("VISUAL").ok())
                .unwrap_or_else(|| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let status = Command::new(&chosen)
                .arg(&path)
                .status()
                .map_err(|e| AppError::Config(format!("failed to launch '{chosen}': {e}")))?;

            if !status.success() {
                return Err(AppError::Config(format!("editor exited with {status}")));
            }

            return Ok(());
        }

        info("Use --print to show the configuration or --edit to change it.");
    }

    Ok(())
}

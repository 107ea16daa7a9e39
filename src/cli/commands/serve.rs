use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::server::run_server;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind } = cmd {
        let mut cfg = cfg.clone();
        if let Some(b) = bind {
            cfg.bind_addr = b.clone();
        }

        run_server(cfg)?;
    }
    Ok(())
}

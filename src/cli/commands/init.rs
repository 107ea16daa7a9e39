use crate::config::Config;
use crate::db::log::oplog;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::initialize::init_db;
use rusqlite::Connection;
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the data directory
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::init_all(cli.db.clone(), cli.test)?;

    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = dir.clone();
        fs::create_dir_all(&cfg.data_dir)?;
    }

    println!("⚙️  Initializing rollcall…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("📁 Data dir    : {}", &cfg.data_dir);
    println!("🗄️  Database   : {}", &cfg.database);

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", &cfg.database);

    // Internal log write is non-blocking
    if let Err(e) = oplog(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rollcall initialization completed!");
    Ok(())
}

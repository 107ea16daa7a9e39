use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::store::registry::Registry;
use crate::ui::messages::success;
use crate::utils::date;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        import,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            init_db(&pool.conn)?;
            success("Migrations up to date.");
        }

        if let Some(file) = import {
            init_db(&pool.conn)?;

            let students = Registry::new(PathBuf::from(file)).load_all()?;
            let n = queries::import_students(&pool.conn, &students)?;

            if let Err(e) = oplog(
                &pool.conn,
                "import",
                file,
                &format!("Imported {n} students"),
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            success(format!("Imported {} students into {}", n, cfg.database));
        }

        if *info {
            init_db(&pool.conn)?;

            let students = queries::student_total(&pool.conn)?;
            let total = queries::attendance_total(&pool.conn)?;
            let today = queries::attendance_count_for_date(&pool.conn, date::today())?;

            println!("🗄️  Database: {}", cfg.database);
            println!("   Students registered : {}", students);
            println!("   Attendance rows     : {}", total);
            println!("   Marked today        : {}", today);
        }
    }

    Ok(())
}

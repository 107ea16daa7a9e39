use crate::config::Config;
use crate::db::log::oplog;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Back up the data files (registry, code files, ledger and, when
    /// present, the service database).
    ///
    /// Without `--compress` the destination is a directory receiving plain
    /// copies; with it, a single zip archive is written at the destination
    /// path.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<()> {
        let sources = existing_data_files(cfg);
        if sources.is_empty() {
            return Err(AppError::Other(
                "Nothing to back up: no data files found".to_string(),
            ));
        }

        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        // Existing destination file → ask confirmation
        if dest.is_file() {
            println!(
                "⚠️  The file '{}' already exists.\nDo you want to overwrite it? [y/N]: ",
                dest.display()
            );

            let mut answer = String::new();
            print!("> ");
            io::stdout().flush().ok();
            io::stdin().read_line(&mut answer)?;

            let answer = answer.trim().to_lowercase();
            if !(answer == "y" || answer == "yes") {
                println!("❌ Backup cancelled by user.");
                return Ok(());
            }
            println!();
        }

        if compress {
            compress_backup(dest, &sources)?;
        } else {
            fs::create_dir_all(dest)?;
            for src in &sources {
                let name = src.file_name().unwrap_or(src.as_os_str());
                fs::copy(src, dest.join(name))?;
            }
            println!("✅ Backup created: {}", dest.display());
        }

        // Record in the internal log when the service database is around
        let db_path = Path::new(&cfg.database);
        if db_path.exists()
            && let Ok(conn) = Connection::open(db_path)
        {
            let _ = oplog(
                &conn,
                "backup",
                &dest.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(())
    }
}

fn existing_data_files(cfg: &Config) -> Vec<PathBuf> {
    let mut files = vec![
        cfg.students_file(),
        cfg.active_code_file(),
        cfg.history_file(),
        cfg.attendance_file(),
    ];
    files.push(PathBuf::from(&cfg.database));
    files.into_iter().filter(|p| p.is_file()).collect()
}

/// Write all data files into one .zip archive.
fn compress_backup(dest: &Path, sources: &[PathBuf]) -> AppResult<()> {
    let file = fs::File::create(dest)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for src in sources {
        let name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data".to_string());

        zip.start_file(name, options).map_err(io::Error::other)?;

        let mut f = fs::File::open(src)?;
        io::copy(&mut f, &mut zip)?;
    }

    zip.finish().map_err(io::Error::other)?;

    println!("📦 Compressed backup: {}", dest.display());
    Ok(())
}

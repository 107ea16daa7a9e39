use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the registry, code files, ledger and snapshots.
    pub data_dir: String,
    /// SQLite database used by the service variant.
    pub database: String,
    #[serde(default = "default_classroom_lat")]
    pub classroom_lat: f64,
    #[serde(default = "default_classroom_lon")]
    pub classroom_lon: f64,
    #[serde(default = "default_allowed_radius")]
    pub allowed_radius_m: f64,
    #[serde(default = "default_code_validity")]
    pub code_validity_minutes: i64,
    /// External frame grabber: invoked with the output path appended,
    /// must write one JPEG frame there. None = no camera available.
    #[serde(default)]
    pub camera_cmd: Option<String>,
    /// External face detector: invoked with an image path appended, must
    /// print the number of detected faces on stdout. None = accept any
    /// decodable snapshot.
    #[serde(default)]
    pub face_detector_cmd: Option<String>,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

// KMCT college coordinates, kept from the original deployment.
fn default_classroom_lat() -> f64 {
    11.00314
}
fn default_classroom_lon() -> f64 {
    76.20058
}
fn default_allowed_radius() -> f64 {
    50.0
}
fn default_code_validity() -> i64 {
    5
}
fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let dir = Self::config_dir();
        Self {
            data_dir: dir.to_string_lossy().to_string(),
            database: Self::database_file().to_string_lossy().to_string(),
            classroom_lat: default_classroom_lat(),
            classroom_lon: default_classroom_lon(),
            allowed_radius_m: default_allowed_radius(),
            code_validity_minutes: default_code_validity(),
            camera_cmd: None,
            face_detector_cmd: None,
            bind_addr: default_bind_addr(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rollcall")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rollcall")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rollcall.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rollcall.sqlite")
    }

    // Per-file paths inside the data directory. The file names are part of
    // the external interface and must not change.

    pub fn active_code_file(&self) -> PathBuf {
        Path::new(&self.data_dir).join("active_code.json")
    }

    pub fn history_file(&self) -> PathBuf {
        Path::new(&self.data_dir).join("codes_history.json")
    }

    pub fn students_file(&self) -> PathBuf {
        Path::new(&self.data_dir).join("students.json")
    }

    pub fn attendance_file(&self) -> PathBuf {
        Path::new(&self.data_dir).join("attendance.csv")
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("snapshots")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Config::default()
        }
    }

    /// Initialize configuration, data directory and database paths.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        fs::create_dir_all(&config.data_dir)?;

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}

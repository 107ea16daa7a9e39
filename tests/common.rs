#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, Local};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rollcall() -> Command {
    cargo_bin_cmd!("rollcall")
}

/// One isolated test environment: acts as HOME, data directory and
/// database location for a single test.
pub struct Sandbox {
    pub home: PathBuf,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

pub fn sandbox(name: &str) -> Sandbox {
    let mut home = env::temp_dir();
    home.push(format!("{name}_rollcall"));
    let _ = fs::remove_dir_all(&home);

    let data_dir = home.join("data");
    fs::create_dir_all(&data_dir).expect("create sandbox");

    let db_path = home.join("rollcall.sqlite");

    Sandbox {
        home,
        data_dir,
        db_path,
    }
}

impl Sandbox {
    /// Write a config file the CLI picks up through $HOME, wiring the
    /// camera to a `cp` of the fixture image.
    pub fn write_config(&self) {
        let fixture = self.write_fixture_image();
        let conf_dir = self.home.join(".rollcall");
        fs::create_dir_all(&conf_dir).expect("create config dir");

        let yaml = format!(
            "data_dir: {}\ndatabase: {}\ncamera_cmd: cp {}\n",
            self.data_dir.display(),
            self.db_path.display(),
            fixture.display()
        );
        fs::write(conf_dir.join("rollcall.conf"), yaml).expect("write config");
    }

    pub fn write_fixture_image(&self) -> PathBuf {
        let path = self.home.join("fixture.png");
        fs::write(&path, fixture_png()).expect("write fixture image");
        path
    }

    pub fn write_students(&self) {
        let students = r#"[
  {"roll_no": "R100", "name": "Alice Johnson", "password": "alicepw"},
  {"roll_no": "R101", "name": "Bob Verma", "password": "bobpw"}
]"#;
        fs::write(self.data_dir.join("students.json"), students).expect("write registry");
    }

    /// Publish an active code issued `minutes_ago` minutes in the past.
    pub fn write_active_code(&self, code: &str, minutes_ago: i64) {
        let issued = Local::now().naive_local() - Duration::minutes(minutes_ago);
        let entry = format!(
            r#"{{"code": "{}", "time": "{}"}}"#,
            code,
            issued.format("%Y-%m-%d %H:%M:%S")
        );
        fs::write(self.data_dir.join("active_code.json"), &entry).expect("write active code");
        fs::write(
            self.data_dir.join("codes_history.json"),
            format!("[{entry}]"),
        )
        .expect("write history");
    }

    /// Data rows currently in the ledger (header excluded).
    pub fn attendance_rows(&self) -> usize {
        let path = self.data_dir.join("attendance.csv");
        if !path.exists() {
            return 0;
        }
        let content = fs::read_to_string(path).expect("read ledger");
        content
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty())
            .count()
    }

    /// Two ledger rows on different dates, written directly.
    pub fn write_ledger_fixture(&self) {
        let rows = "Date,Roll No,Name,Code,Timestamp,Snapshot\n\
                    2024-01-01,R100,Alice Johnson,123456,2024-01-01 09:00:00,R100_20240101_090000.jpg\n\
                    2024-02-01,R101,Bob Verma,654321,2024-02-01 09:00:00,R101_20240201_090000.jpg\n";
        fs::write(self.data_dir.join("attendance.csv"), rows).expect("write ledger fixture");
    }

    pub fn snapshot_count(&self) -> usize {
        let dir = self.data_dir.join("snapshots");
        if !dir.exists() {
            return 0;
        }
        fs::read_dir(dir).expect("read snapshots").count()
    }
}

/// Small but genuinely decodable PNG, encoded through the image crate.
pub fn fixture_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([120, 120, 120]));
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode fixture image");
    buf.into_inner()
}

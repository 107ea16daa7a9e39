//! Snapshot acquisition, validation and storage.
//!
//! Camera access and face detection are external capabilities behind narrow
//! contracts: a grabber produces one frame, a detector counts faces. Both
//! are pluggable; the core only persists what passed validation.

pub mod camera;
pub mod face;

use crate::errors::{AppError, AppResult};
use base64::Engine;
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

/// Filename stamp, distinct from the ledger timestamp format.
const SNAPSHOT_STAMP_FMT: &str = "%Y%m%d_%H%M%S";

/// Persists validated snapshot images under a dedicated directory, created
/// on demand. Each file belongs to exactly one attendance record.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Deterministic filename: `<roll_no>_<YYYYMMDD_HHMMSS>.jpg`.
    pub fn filename_for(roll_no: &str, at: NaiveDateTime) -> String {
        format!("{}_{}.jpg", roll_no, at.format(SNAPSHOT_STAMP_FMT))
    }

    /// Write the image and return the stored filename.
    pub fn save(&self, roll_no: &str, at: NaiveDateTime, image: &[u8]) -> AppResult<String> {
        fs::create_dir_all(&self.dir)?;

        let filename = Self::filename_for(roll_no, at);
        fs::write(self.dir.join(&filename), image)?;
        Ok(filename)
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

/// Decode a base64 snapshot payload and verify it is a readable image.
pub fn decode_snapshot(b64: &str) -> AppResult<Vec<u8>> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|e| AppError::SnapshotDecode(e.to_string()))?;

    image::load_from_memory(&bytes).map_err(|e| AppError::SnapshotDecode(e.to_string()))?;

    Ok(bytes)
}

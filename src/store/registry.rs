//! Read-only student directory backed by `students.json`.
//!
//! The registry is re-read on every call. It is small and read-mostly, so
//! the lack of caching keeps external edits visible within one lookup.

use crate::errors::{AppError, AppResult};
use crate::models::student::Student;
use std::fs;
use std::path::PathBuf;

pub struct Registry {
    file: PathBuf,
}

impl Registry {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    pub fn load_all(&self) -> AppResult<Vec<Student>> {
        if !self.file.exists() {
            return Err(AppError::RegistryNotFound(self.file.display().to_string()));
        }

        let content = fs::read_to_string(&self.file)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Other(format!("corrupt student registry: {e}")))
    }

    /// Authenticate by roll number + password, returning the full record.
    pub fn authenticate(&self, roll_no: &str, password: &str) -> AppResult<Option<Student>> {
        let students = self.load_all()?;
        Ok(students
            .into_iter()
            .find(|s| s.matches_login(roll_no, password)))
    }

    /// Verify a roll number / name pair. Names compare case-insensitively,
    /// roll numbers exactly.
    pub fn verify_identity(&self, roll_no: &str, name: &str) -> AppResult<bool> {
        let students = self.load_all()?;
        Ok(students.iter().any(|s| s.matches_identity(roll_no, name)))
    }
}

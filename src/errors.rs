//! Unified application error type.
//! All modules (store, db, core, cli, server) return AppError to keep the
//! error handling consistent across the console and service variants.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    // ---------------------------
    // Attendance attempt errors
    // ---------------------------
    #[error("Login failed: check roll number or password")]
    AuthenticationFailure,

    #[error("Invalid roll number / name combination")]
    IdentityMismatch,

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Student registry not found: {0}")]
    RegistryNotFound(String),

    #[error("No active code found. Ask your teacher for one")]
    NoActiveCode,

    #[error("Code has expired. Ask the teacher for a new one")]
    CodeExpired,

    #[error("Wrong code")]
    CodeMismatch,

    #[error("Too far from the classroom: {0} meters")]
    LocationOutOfRange(u64),

    #[error("Could not access the camera: {0}")]
    CameraUnavailable(String),

    #[error("Snapshot could not be decoded: {0}")]
    SnapshotDecode(String),

    #[error("No face detected in snapshot")]
    NoFaceDetected,

    #[error("Attendance already marked")]
    DuplicateAttendance,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

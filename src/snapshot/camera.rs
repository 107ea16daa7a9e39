//! Camera contract for the console variant: one frame in JPEG bytes out.

use crate::errors::{AppError, AppResult};
use std::fs;
use std::process::Command;

pub trait Camera {
    /// Acquire a single frame. Fails if the device cannot be opened or no
    /// frame can be read.
    fn grab_frame(&self) -> AppResult<Vec<u8>>;
}

/// External frame grabber. The configured command is invoked with the
/// output path appended as its last argument and must write one JPEG
/// frame there (e.g. `fswebcam --no-banner`).
pub struct CommandCamera {
    cmd: String,
}

impl CommandCamera {
    pub fn new(cmd: String) -> Self {
        Self { cmd }
    }
}

impl Camera for CommandCamera {
    fn grab_frame(&self) -> AppResult<Vec<u8>> {
        let mut parts = self.cmd.split_whitespace();
        let prog = parts
            .next()
            .ok_or_else(|| AppError::CameraUnavailable("empty camera command".to_string()))?;

        let tmp = tempfile::Builder::new()
            .suffix(".jpg")
            .tempfile()
            .map_err(|e| AppError::CameraUnavailable(e.to_string()))?;

        let status = Command::new(prog)
            .args(parts)
            .arg(tmp.path())
            .status()
            .map_err(|e| AppError::CameraUnavailable(e.to_string()))?;

        if !status.success() {
            return Err(AppError::CameraUnavailable(format!(
                "frame grabber exited with {status}"
            )));
        }

        let bytes = fs::read(tmp.path())?;
        if bytes.is_empty() {
            return Err(AppError::CameraUnavailable(
                "frame grabber produced no frame".to_string(),
            ));
        }

        Ok(bytes)
    }
}

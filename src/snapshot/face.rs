//! Face-presence contract for the service variant: image in, count out.

use crate::errors::{AppError, AppResult};
use std::io::Write;
use std::process::Command;

pub trait FaceDetector: Send + Sync {
    /// Number of faces present in the given JPEG/PNG bytes.
    fn count_faces(&self, image: &[u8]) -> AppResult<usize>;
}

/// External detector. The configured command is invoked with an image path
/// appended as its last argument and must print the face count on stdout.
pub struct CommandDetector {
    cmd: String,
}

impl CommandDetector {
    pub fn new(cmd: String) -> Self {
        Self { cmd }
    }
}

impl FaceDetector for CommandDetector {
    fn count_faces(&self, image: &[u8]) -> AppResult<usize> {
        let mut parts = self.cmd.split_whitespace();
        let prog = parts
            .next()
            .ok_or_else(|| AppError::Other("empty face detector command".to_string()))?;

        let mut tmp = tempfile::Builder::new()
            .suffix(".jpg")
            .tempfile()
            .map_err(AppError::Io)?;
        tmp.write_all(image)?;

        let output = Command::new(prog)
            .args(parts)
            .arg(tmp.path())
            .output()
            .map_err(|e| AppError::Other(format!("face detector failed to start: {e}")))?;

        if !output.status.success() {
            return Err(AppError::Other(format!(
                "face detector exited with {}",
                output.status
            )));
        }

        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .map_err(|_| AppError::Other("face detector printed no count".to_string()))
    }
}

/// Used when no detector is configured: every decodable snapshot counts as
/// one face. Deployments that need real detection configure a command.
pub struct AcceptAllDetector;

impl FaceDetector for AcceptAllDetector {
    fn count_faces(&self, _image: &[u8]) -> AppResult<usize> {
        Ok(1)
    }
}

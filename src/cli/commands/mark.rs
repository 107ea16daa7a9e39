use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::mark::{MarkLogic, MarkRequest};
use crate::errors::{AppError, AppResult};
use crate::snapshot::camera::CommandCamera;
use crate::ui::messages::{header, info, prompt, success, warning};

/// Mark attendance for one student. Whatever is not given as a flag is
/// asked for interactively, in the original prompt order.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark {
        roll,
        password,
        lat,
        lon,
        code,
    } = cmd
    {
        //
        // 1. Credentials
        //
        if roll.is_none() || password.is_none() {
            header("Student Login");
        }
        let roll = value_or_prompt(roll, "Enter Roll No")?;
        let password = value_or_prompt(password, "Enter Password")?;

        //
        // 2. Coordinates (raw input, no external GPS source)
        //
        if lat.is_none() || lon.is_none() {
            header("Classroom Location Verification");
        }
        let lat = coord_or_prompt(lat, "Enter your current latitude")?;
        let lon = coord_or_prompt(lon, "Enter your current longitude")?;

        //
        // 3. Code
        //
        let code = value_or_prompt(code, "Enter Attendance Code")?;

        //
        // 4. Camera from configuration
        //
        let camera_cmd = cfg.camera_cmd.clone().ok_or_else(|| {
            AppError::CameraUnavailable("no camera command configured".to_string())
        })?;
        let camera = CommandCamera::new(camera_cmd);

        info("Capturing snapshot. Please look at the camera...");

        let req = MarkRequest {
            roll_no: roll,
            password,
            lat,
            lon,
            code,
        };

        match MarkLogic::apply(cfg, &camera, &req) {
            Ok(rec) => {
                success(format!("Snapshot saved: {}", rec.snapshot));
                success("Attendance marked successfully!");
                Ok(())
            }
            // A duplicate is an idempotent rejection, not a failure.
            Err(AppError::DuplicateAttendance) => {
                warning("Attendance already marked!");
                Ok(())
            }
            Err(e) => Err(e),
        }
    } else {
        Ok(())
    }
}

fn value_or_prompt(value: &Option<String>, label: &str) -> AppResult<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => Ok(prompt(label)?),
    }
}

fn coord_or_prompt(value: &Option<f64>, label: &str) -> AppResult<f64> {
    match value {
        Some(v) => Ok(*v),
        None => {
            let raw = prompt(label)?;
            raw.parse()
                .map_err(|_| AppError::InvalidCoordinate(raw.clone()))
        }
    }
}

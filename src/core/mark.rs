use crate::config::Config;
use crate::core::{code, geo};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::snapshot::SnapshotStore;
use crate::snapshot::camera::Camera;
use crate::store::codes::CodeStore;
use crate::store::ledger::CsvLedger;
use crate::store::registry::Registry;
use crate::utils::date;

/// One console attendance attempt, fully parsed.
pub struct MarkRequest {
    pub roll_no: String,
    pub password: String,
    pub lat: f64,
    pub lon: f64,
    pub code: String,
}

pub struct MarkLogic;

impl MarkLogic {
    /// Run the attendance sequence for one student. Every step is terminal
    /// on failure; nothing is written to the ledger before the final step.
    pub fn apply(
        cfg: &Config,
        camera: &dyn Camera,
        req: &MarkRequest,
    ) -> AppResult<AttendanceRecord> {
        //
        // 1. Authenticate, then re-verify the roll/name pair against the
        //    registry (it is re-read per call and may have changed).
        //
        let registry = Registry::new(cfg.students_file());
        let student = registry
            .authenticate(&req.roll_no, &req.password)?
            .ok_or(AppError::AuthenticationFailure)?;

        if !registry.verify_identity(&student.roll_no, &student.name)? {
            return Err(AppError::IdentityMismatch);
        }

        //
        // 2. Location check against the classroom reference point.
        //
        let dist = geo::distance_m(cfg.classroom_lat, cfg.classroom_lon, req.lat, req.lon);
        if dist > cfg.allowed_radius_m {
            return Err(AppError::LocationOutOfRange(dist as u64));
        }

        //
        // 3. Code check against the active code.
        //
        let now = date::now();
        let active = CodeStore::new(cfg).load_active()?;
        code::validate(active.as_ref(), &req.code, now, cfg.code_validity_minutes)?;

        //
        // 4. Snapshot: one frame from the camera, stored under the
        //    roll-number/timestamp filename.
        //
        let frame = camera.grab_frame()?;
        let snapshot =
            SnapshotStore::new(cfg.snapshot_dir()).save(&student.roll_no, now, &frame)?;

        //
        // 5. Ledger append (duplicate-safe).
        //
        let record = AttendanceRecord::new(
            now,
            student.roll_no.clone(),
            student.name.clone(),
            req.code.clone(),
            snapshot,
        );
        CsvLedger::new(cfg.attendance_file()).append(&record)?;

        Ok(record)
    }
}

use crate::core::{code, geo};
use crate::db::queries::{self, TEACHER_ID_PLACEHOLDER};
use crate::errors::{AppError, AppResult};
use crate::server::AppState;
use crate::snapshot;
use crate::utils::date;
use actix_web::{HttpResponse, Scope, web};
use log::error;
use serde::{Deserialize, Serialize};

pub fn configure_routes() -> Scope {
    web::scope("/student").route("/mark_attendance", web::post().to(mark_attendance))
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub roll_no: String,
    pub class_code: String,
    pub gps_lat: f64,
    pub gps_lon: f64,
    /// Base64-encoded image
    pub snapshot: String,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
    msg: &'a str,
}

fn body<'a>(status: &'a str, msg: &'a str) -> StatusBody<'a> {
    StatusBody { status, msg }
}

enum MarkOutcome {
    Marked,
    Duplicate,
}

pub async fn mark_attendance(
    state: web::Data<AppState>,
    payload: web::Json<MarkAttendanceRequest>,
) -> HttpResponse {
    match handle_mark(state.get_ref(), &payload) {
        Ok(MarkOutcome::Marked) => HttpResponse::Ok().json(body("success", "Attendance marked")),
        Ok(MarkOutcome::Duplicate) => {
            HttpResponse::Ok().json(body("duplicate", "Attendance already marked"))
        }
        Err(e) => error_response(&e),
    }
}

fn handle_mark(state: &AppState, req: &MarkAttendanceRequest) -> AppResult<MarkOutcome> {
    // Held for the whole attempt: ledger inserts must be serialized.
    let conn = state
        .conn
        .lock()
        .map_err(|_| AppError::Other("state lock poisoned".to_string()))?;

    //
    // 1. Student lookup (exact roll number).
    //
    let (student_id, student) = queries::find_student_by_roll(&conn, &req.roll_no)?
        .ok_or_else(|| AppError::StudentNotFound(req.roll_no.clone()))?;

    //
    // 2. GPS proximity. Coordinates are trusted as the client sent them;
    //    there is no server-side corroboration.
    //
    let dist = geo::distance_m(
        state.classroom_lat,
        state.classroom_lon,
        req.gps_lat,
        req.gps_lon,
    );
    if dist > state.allowed_radius_m {
        return Err(AppError::LocationOutOfRange(dist as u64));
    }

    //
    // 3. Code check.
    //
    let now = date::now();
    let active = {
        let codes = state
            .codes
            .lock()
            .map_err(|_| AppError::Other("state lock poisoned".to_string()))?;
        codes.load_active()?
    };
    code::validate(
        active.as_ref(),
        &req.class_code,
        now,
        state.code_validity_minutes,
    )?;

    //
    // 4. Snapshot: decode, detect, persist only what passed validation.
    //
    let image = snapshot::decode_snapshot(&req.snapshot)?;
    if state.detector.count_faces(&image)? == 0 {
        return Err(AppError::NoFaceDetected);
    }
    let filename = state.snapshots.save(&student.roll_no, now, &image)?;
    let stored = state.snapshots.path_of(&filename);

    //
    // 5. Atomic insert; a UNIQUE conflict is the duplicate signal.
    //
    let inserted = queries::insert_attendance(
        &conn,
        student_id,
        TEACHER_ID_PLACEHOLDER,
        now.date(),
        &req.class_code,
        req.gps_lat,
        req.gps_lon,
        &stored.to_string_lossy(),
        now,
    )?;

    Ok(if inserted {
        MarkOutcome::Marked
    } else {
        MarkOutcome::Duplicate
    })
}

fn error_response(err: &AppError) -> HttpResponse {
    let msg = err.to_string();
    match err {
        AppError::StudentNotFound(_) => {
            HttpResponse::NotFound().json(body("error", "Student not found"))
        }
        AppError::NoActiveCode
        | AppError::CodeExpired
        | AppError::CodeMismatch
        | AppError::LocationOutOfRange(_)
        | AppError::SnapshotDecode(_)
        | AppError::NoFaceDetected => HttpResponse::BadRequest().json(body("error", &msg)),
        _ => {
            error!("mark_attendance failed: {msg}");
            HttpResponse::InternalServerError().json(body("error", "Internal server error"))
        }
    }
}

//! Attendance code generation and validation.

use crate::errors::{AppError, AppResult};
use crate::models::active_code::ActiveCode;
use chrono::{Duration, NaiveDateTime};
use rand::Rng;

/// Uniformly random 6-digit code, 100000–999999 inclusive. The range never
/// produces a leading zero; it is kept exactly as the deployed system
/// generates codes.
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Check a submitted code against the active one.
///
/// The validity window is closed-open: a code is accepted up to one second
/// before `issued_at + validity`, and rejected from the expiry instant on.
/// Expiry is checked before the code comparison, so a stale wrong code
/// reports "expired" rather than "mismatch".
pub fn validate(
    active: Option<&ActiveCode>,
    submitted: &str,
    now: NaiveDateTime,
    validity_minutes: i64,
) -> AppResult<()> {
    let active = active.ok_or(AppError::NoActiveCode)?;
    let issued = active.issued_at()?;

    if now >= issued + Duration::minutes(validity_minutes) {
        return Err(AppError::CodeExpired);
    }

    if submitted != active.code {
        return Err(AppError::CodeMismatch);
    }

    Ok(())
}

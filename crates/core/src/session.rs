//! Class session lifecycle constants, id generation and validation.
//!
//! Status strings must match the `CHECK` constraint on `sessions.status`.

use chrono::{NaiveDate, NaiveTime};
use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const SESSION_SCHEDULED: &str = "scheduled";
pub const SESSION_ONGOING: &str = "ongoing";
pub const SESSION_COMPLETED: &str = "completed";
pub const SESSION_CANCELLED: &str = "cancelled";

/// All valid session statuses.
pub const VALID_STATUSES: &[&str] = &[
    SESSION_SCHEDULED,
    SESSION_ONGOING,
    SESSION_COMPLETED,
    SESSION_CANCELLED,
];

/// Location stored when the admin leaves it blank.
pub const DEFAULT_LOCATION: &str = "TBD";

/// Maximum attempts at finding an unused session id before giving up.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// Validate that a status string is one of the known session statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid session status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// A session must end after it starts.
pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "end_time ({end}) must be after start_time ({start})"
        )));
    }
    Ok(())
}

/// Whether students may still clock in to a session in this status.
pub fn accepts_clock_in(status: &str) -> bool {
    status == SESSION_SCHEDULED || status == SESSION_ONGOING
}

// ---------------------------------------------------------------------------
// Id generation
// ---------------------------------------------------------------------------

/// Build a session id of the form `{course_code}-{yyyymmdd}-{nnnn}`.
pub fn format_session_id(course_code: &str, created_on: NaiveDate, suffix: u16) -> String {
    format!("{course_code}-{}-{suffix:04}", created_on.format("%Y%m%d"))
}

/// Generate a fresh session id with a random four-digit suffix (1000..=9999).
pub fn generate_session_id(course_code: &str, created_on: NaiveDate) -> String {
    let suffix: u16 = rand::rng().random_range(1000..=9999);
    format_session_id(course_code, created_on, suffix)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

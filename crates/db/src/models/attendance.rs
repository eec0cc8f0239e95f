//! Attendance model, DTOs and aggregate rows.

use chrono::{NaiveDate, NaiveTime};
use edulog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub attendance_id: DbId,
    pub student_id: DbId,
    pub session_id: Option<String>,
    pub date: NaiveDate,
    pub status: String,
    pub clock_in_time: Option<Timestamp>,
    pub clock_out_time: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for a manually recorded attendance row.
#[derive(Debug, Deserialize)]
pub struct CreateAttendance {
    pub student_id: DbId,
    pub session_id: Option<String>,
    pub date: NaiveDate,
    pub status: String,
    pub clock_in_time: Option<Timestamp>,
    pub clock_out_time: Option<Timestamp>,
}

/// DTO for correcting an attendance row. Only present fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateAttendance {
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub clock_in_time: Option<Timestamp>,
    pub clock_out_time: Option<Timestamp>,
}

/// One entry of a student's attendance history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceHistoryItem {
    pub attendance_id: DbId,
    pub session_id: Option<String>,
    pub date: NaiveDate,
    pub status: String,
    pub clock_in_time: Option<Timestamp>,
    pub clock_out_time: Option<Timestamp>,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub course_name: String,
    pub course_code: String,
    pub teacher_name: String,
}

/// Status counts across a set of attendance rows.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct StatusCounts {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
}

/// Attended/total counts for two consecutive windows, used for trends.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct WindowCounts {
    pub recent_attended: i64,
    pub recent_total: i64,
    pub prior_attended: i64,
    pub prior_total: i64,
}

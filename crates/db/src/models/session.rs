//! Class session model, DTOs and joined views.

use chrono::{NaiveDate, NaiveTime};
use edulog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub session_id: String,
    pub course_id: DbId,
    pub teacher_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Session joined with its course and teacher, as listed to admins.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionDetail {
    pub session_id: String,
    pub course_id: DbId,
    pub teacher_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub status: String,
    pub course_code: String,
    pub course_name: String,
    pub teacher_name: String,
    pub teacher_email: String,
}

/// Upcoming session as seen by an enrolled student, with their own
/// attendance status for it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentSession {
    pub session_id: String,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub status: String,
    pub course_id: DbId,
    pub course_code: String,
    pub course_name: String,
    pub teacher_name: String,
    pub attendance_status: String,
}

/// DTO for inserting a session. The id is generated by the caller and the
/// course/teacher are already resolved.
#[derive(Debug)]
pub struct CreateSession {
    pub session_id: String,
    pub course_id: DbId,
    pub teacher_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

/// DTO for updating a session. Only present fields are applied.
#[derive(Debug, Default)]
pub struct UpdateSession {
    pub course_id: Option<DbId>,
    pub teacher_id: Option<DbId>,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub status: Option<String>,
}

//! Enrollment (student ↔ course) model.

use chrono::NaiveDate;
use edulog_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `student_courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub student_id: DbId,
    pub course_id: DbId,
    pub enrollment_date: NaiveDate,
    pub status: String,
}

/// A course the student is enrolled in, with enrollment metadata.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrolledCourse {
    pub course_id: DbId,
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub enrollment_date: NaiveDate,
    pub status: String,
}

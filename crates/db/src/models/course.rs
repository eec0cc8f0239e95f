//! Course model and DTOs.

use edulog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub course_id: DbId,
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal course listing shown to any signed-in user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseSummary {
    pub course_id: DbId,
    pub course_code: String,
    pub course_name: String,
}

/// DTO for creating a course.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourse {
    #[validate(length(min = 1, max = 32, message = "course_code must be 1-32 characters"))]
    pub course_code: String,
    #[validate(length(min = 1, message = "course_name is required"))]
    pub course_name: String,
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
}

/// DTO for updating a course. Only present fields are applied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourse {
    #[validate(length(min = 1, max = 32, message = "course_code must be 1-32 characters"))]
    pub course_code: Option<String>,
    #[validate(length(min = 1, message = "course_name must not be empty"))]
    pub course_name: Option<String>,
    #[validate(length(min = 1, message = "department must not be empty"))]
    pub department: Option<String>,
}

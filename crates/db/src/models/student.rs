//! Student model and DTOs.

use edulog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub student_id: DbId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub course_id: Option<DbId>,
    pub year_of_study: i32,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Student listing row with the name of the student's home course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentWithCourse {
    pub student_id: DbId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub year_of_study: i32,
    pub phone: Option<String>,
    pub course_id: Option<DbId>,
    pub course_name: Option<String>,
}

/// DTO for creating a student.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
    pub course_id: Option<DbId>,
    #[validate(range(min = 1, max = 10, message = "year_of_study must be between 1 and 10"))]
    pub year_of_study: i32,
    pub phone: Option<String>,
}

/// DTO for updating a student. Only present fields are applied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "department must not be empty"))]
    pub department: Option<String>,
    pub course_id: Option<DbId>,
    #[validate(range(min = 1, max = 10, message = "year_of_study must be between 1 and 10"))]
    pub year_of_study: Option<i32>,
    pub phone: Option<String>,
}

//! Teacher model and DTOs.

use edulog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `teachers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub teacher_id: DbId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a teacher.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeacher {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
}

/// DTO for updating a teacher. Only present fields are applied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeacher {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "department must not be empty"))]
    pub department: Option<String>,
}

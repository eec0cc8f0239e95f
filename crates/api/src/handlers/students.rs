//! Handlers for the `/admin/students` resource.

use axum::extract::State;
use edulog_core::error::CoreError;
use edulog_core::types::DbId;
use edulog_db::models::student::{CreateStudent, Student, StudentWithCourse, UpdateStudent};
use edulog_db::repositories::StudentRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{JsonBody, UrlPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, deleted, ok, ApiJson, Created, Deleted};
use crate::state::AppState;

/// GET /api/admin/students
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiJson<Vec<StudentWithCourse>>> {
    let students = StudentRepo::list_with_course(&state.pool).await?;
    Ok(ok(students))
}

/// GET /api/admin/students/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Student>> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Student", id))?;
    Ok(ok(student))
}

/// POST /api/admin/students
///
/// An unknown `course_id` is a 400; a duplicate email is a 409.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateStudent>,
) -> AppResult<Created<Student>> {
    input.validate()?;
    let student = StudentRepo::create(&state.pool, &input).await?;
    tracing::info!(student_id = student.student_id, by = admin.user_id, "Student created");
    Ok(created(student))
}

/// PUT /api/admin/students/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
    JsonBody(input): JsonBody<UpdateStudent>,
) -> AppResult<ApiJson<Student>> {
    input.validate()?;
    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Student", id))?;
    Ok(ok(student))
}

/// DELETE /api/admin/students/{id}
///
/// Attendance and enrollments go with the student; a linked account is
/// kept but unlinked.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Deleted>> {
    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Student", id).into());
    }
    tracing::info!(student_id = id, by = admin.user_id, "Student deleted");
    Ok(deleted())
}

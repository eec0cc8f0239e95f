//! Handlers for a student's course enrollments (`/student/courses`).

use axum::extract::State;
use edulog_core::error::CoreError;
use edulog_core::types::DbId;
use edulog_db::models::course::Course;
use edulog_db::models::enrollment::{EnrolledCourse, Enrollment};
use edulog_db::repositories::{CourseRepo, EnrollmentRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, UrlPath};
use crate::middleware::rbac::RequireStudent;
use crate::response::{created, ok, ApiJson, Created};
use crate::state::AppState;

/// Request body for `POST /api/student/courses/enroll`.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: DbId,
}

/// GET /api/student/courses/enrolled
pub async fn enrolled(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<ApiJson<Vec<EnrolledCourse>>> {
    let courses = EnrollmentRepo::list_enrolled(&state.pool, student.student_id).await?;
    Ok(ok(courses))
}

/// GET /api/student/courses/available
pub async fn available(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<ApiJson<Vec<Course>>> {
    let courses = EnrollmentRepo::list_available(&state.pool, student.student_id).await?;
    Ok(ok(courses))
}

/// POST /api/student/courses/enroll
///
/// Re-enrolling in a dropped course reactivates it.
pub async fn enroll(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<EnrollRequest>,
) -> AppResult<Created<Enrollment>> {
    CourseRepo::find_by_id(&state.pool, input.course_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", input.course_id))?;

    if EnrollmentRepo::is_active(&state.pool, student.student_id, input.course_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Already enrolled in this course".into(),
        )));
    }

    let enrollment = EnrollmentRepo::enroll(
        &state.pool,
        student.student_id,
        input.course_id,
        state.config.today(),
    )
    .await?;

    tracing::info!(student_id = student.student_id, course_id = input.course_id, "Enrolled");
    Ok(created(enrollment))
}

/// DELETE /api/student/courses/drop/{course_id}
pub async fn drop_course(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    UrlPath(course_id): UrlPath<DbId>,
) -> AppResult<ApiJson<Enrollment>> {
    if !EnrollmentRepo::drop_course(&state.pool, student.student_id, course_id).await? {
        return Err(AppError::NotFound(
            "No active enrollment in this course".into(),
        ));
    }
    let enrollment = EnrollmentRepo::find(&state.pool, student.student_id, course_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Enrollment", course_id))?;
    tracing::info!(student_id = student.student_id, course_id, "Dropped course");
    Ok(ok(enrollment))
}

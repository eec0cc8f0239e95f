//! Handlers for the `/admin/courses` resource and the public course list.

use axum::extract::State;
use edulog_core::error::CoreError;
use edulog_core::types::DbId;
use edulog_db::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};
use edulog_db::repositories::CourseRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, UrlPath, UrlQuery};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::{created, deleted, ok, ApiJson, Created, Deleted};
use crate::state::AppState;

/// Query parameters for `GET /api/admin/courses`.
#[derive(Debug, Default, Deserialize)]
pub struct CourseListParams {
    pub search: Option<String>,
    pub department: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// GET /api/admin/courses?search=&department=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<CourseListParams>,
) -> AppResult<ApiJson<Vec<Course>>> {
    let courses = CourseRepo::list(
        &state.pool,
        non_blank(&params.search),
        non_blank(&params.department),
    )
    .await?;
    Ok(ok(courses))
}

/// GET /api/courses
///
/// Id, code and name of every course, for any signed-in user.
pub async fn list_summaries(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<ApiJson<Vec<CourseSummary>>> {
    let courses = CourseRepo::list_summaries(&state.pool).await?;
    Ok(ok(courses))
}

/// GET /api/admin/courses/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Course>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", id))?;
    Ok(ok(course))
}

/// POST /api/admin/courses
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCourse>,
) -> AppResult<Created<Course>> {
    input.validate()?;
    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(course_id = course.course_id, code = %course.course_code, by = admin.user_id, "Course created");
    Ok(created(course))
}

/// PUT /api/admin/courses/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
    JsonBody(input): JsonBody<UpdateCourse>,
) -> AppResult<ApiJson<Course>> {
    input.validate()?;
    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", id))?;
    Ok(ok(course))
}

/// DELETE /api/admin/courses/{id}
///
/// Refused with 409 while the course still has sessions. Enrollments are
/// removed and students lose their home course.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Deleted>> {
    let removed = CourseRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "Course"))?;
    if !removed {
        return Err(CoreError::not_found("Course", id).into());
    }
    tracing::info!(course_id = id, by = admin.user_id, "Course deleted");
    Ok(deleted())
}

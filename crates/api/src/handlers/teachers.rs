//! Handlers for the `/admin/teachers` resource.

use axum::extract::State;
use edulog_core::error::CoreError;
use edulog_core::types::DbId;
use edulog_db::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use edulog_db::repositories::TeacherRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, UrlPath, UrlQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::{created, deleted, ok, ApiJson, Created, Deleted};
use crate::state::AppState;

/// GET /api/admin/teachers?search=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<SearchParams>,
) -> AppResult<ApiJson<Vec<Teacher>>> {
    let teachers = TeacherRepo::list(&state.pool, params.term()).await?;
    Ok(ok(teachers))
}

/// GET /api/admin/teachers/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Teacher>> {
    let teacher = TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Teacher", id))?;
    Ok(ok(teacher))
}

/// POST /api/admin/teachers
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTeacher>,
) -> AppResult<Created<Teacher>> {
    input.validate()?;
    let teacher = TeacherRepo::create(&state.pool, &input).await?;
    tracing::info!(teacher_id = teacher.teacher_id, by = admin.user_id, "Teacher created");
    Ok(created(teacher))
}

/// PUT /api/admin/teachers/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
    JsonBody(input): JsonBody<UpdateTeacher>,
) -> AppResult<ApiJson<Teacher>> {
    input.validate()?;
    let teacher = TeacherRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Teacher", id))?;
    Ok(ok(teacher))
}

/// DELETE /api/admin/teachers/{id}
///
/// Refused with 409 while the teacher still has sessions.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Deleted>> {
    let removed = TeacherRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "Teacher"))?;
    if !removed {
        return Err(CoreError::not_found("Teacher", id).into());
    }
    tracing::info!(teacher_id = id, by = admin.user_id, "Teacher deleted");
    Ok(deleted())
}

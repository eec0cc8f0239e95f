//! Handlers for the `/admin/sessions` resource.

use axum::extract::State;
use chrono::{NaiveDate, NaiveTime};
use edulog_core::error::CoreError;
use edulog_core::session::{
    generate_session_id, validate_status, validate_time_range, DEFAULT_LOCATION, MAX_ID_ATTEMPTS,
};
use edulog_core::types::DbId;
use edulog_db::models::session::{CreateSession, Session, SessionDetail, UpdateSession};
use edulog_db::repositories::{CourseRepo, SessionRepo, TeacherRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, UrlPath, UrlQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, deleted, ok, ApiJson, Created, Deleted};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/admin/sessions`.
///
/// The course and teacher are named by their natural keys.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub course_code: String,
    pub teacher_email: String,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
}

/// Request body for `PUT /api/admin/sessions/{id}`. Only present fields
/// are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub course_code: Option<String>,
    pub teacher_email: Option<String>,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for `GET /api/admin/sessions`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionListParams {
    pub course_id: Option<DbId>,
    pub teacher_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/sessions?course_id=&teacher_id=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<SessionListParams>,
) -> AppResult<ApiJson<Vec<SessionDetail>>> {
    let sessions = SessionRepo::list_details(&state.pool, params.course_id, params.teacher_id).await?;
    Ok(ok(sessions))
}

/// GET /api/admin/sessions/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> AppResult<ApiJson<SessionDetail>> {
    let session = SessionRepo::find_detail(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Session", &id))?;
    Ok(ok(session))
}

/// POST /api/admin/sessions
///
/// Resolves the course and teacher, then inserts a `scheduled` session
/// under a generated id, retrying on id collisions.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateSessionRequest>,
) -> AppResult<Created<Session>> {
    validate_time_range(input.start_time, input.end_time)?;

    let course = CourseRepo::find_by_code(&state.pool, &input.course_code)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", &input.course_code))?;
    let teacher = TeacherRepo::find_by_email(&state.pool, &input.teacher_email)
        .await?
        .ok_or_else(|| CoreError::not_found("Teacher", &input.teacher_email))?;

    let location = input
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let created_on = state.config.today();

    for attempt in 1..=MAX_ID_ATTEMPTS {
        let row = CreateSession {
            session_id: generate_session_id(&course.course_code, created_on),
            course_id: course.course_id,
            teacher_id: teacher.teacher_id,
            session_date: input.session_date,
            start_time: input.start_time,
            end_time: input.end_time,
            location: location.clone(),
        };

        match SessionRepo::create(&state.pool, &row).await {
            Ok(session) => {
                tracing::info!(
                    session_id = %session.session_id,
                    course_id = course.course_id,
                    by = admin.user_id,
                    "Session created"
                );
                return Ok(created(session));
            }
            Err(e) if edulog_db::is_unique_violation(&e) => {
                tracing::warn!(attempt, session_id = %row.session_id, "Session id collision");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::InternalError(format!(
        "Could not allocate a unique session id after {MAX_ID_ATTEMPTS} attempts"
    )))
}

/// PUT /api/admin/sessions/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    JsonBody(input): JsonBody<UpdateSessionRequest>,
) -> AppResult<ApiJson<Session>> {
    let existing = SessionRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Session", &id))?;

    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    validate_time_range(
        input.start_time.unwrap_or(existing.start_time),
        input.end_time.unwrap_or(existing.end_time),
    )?;

    let course_id = match input.course_code {
        Some(ref code) => Some(
            CourseRepo::find_by_code(&state.pool, code)
                .await?
                .ok_or_else(|| CoreError::not_found("Course", code))?
                .course_id,
        ),
        None => None,
    };
    let teacher_id = match input.teacher_email {
        Some(ref email) => Some(
            TeacherRepo::find_by_email(&state.pool, email)
                .await?
                .ok_or_else(|| CoreError::not_found("Teacher", email))?
                .teacher_id,
        ),
        None => None,
    };

    let changes = UpdateSession {
        course_id,
        teacher_id,
        session_date: input.session_date,
        start_time: input.start_time,
        end_time: input.end_time,
        location: input.location,
        status: input.status,
    };

    let session = SessionRepo::update(&state.pool, &id, &changes)
        .await?
        .ok_or_else(|| CoreError::not_found("Session", &id))?;
    Ok(ok(session))
}

/// DELETE /api/admin/sessions/{id}
///
/// Attendance recorded against the session is removed with it.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> AppResult<ApiJson<Deleted>> {
    if !SessionRepo::delete(&state.pool, &id).await? {
        return Err(CoreError::not_found("Session", &id).into());
    }
    tracing::info!(session_id = %id, by = admin.user_id, "Session deleted");
    Ok(deleted())
}

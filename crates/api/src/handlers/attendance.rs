//! Handlers for clock-in/clock-out and the `/admin/attendance` resource.
//!
//! The student is always taken from the authenticated account, never from
//! the request body.

use axum::extract::State;
use edulog_core::attendance::{clock_in_status, validate_status, STATUS_PRESENT};
use edulog_core::error::CoreError;
use edulog_core::pagination::{clamp_page, page_window};
use edulog_core::session::accepts_clock_in;
use edulog_core::types::{DbId, Timestamp};
use edulog_db::models::attendance::{Attendance, CreateAttendance, UpdateAttendance};
use edulog_db::repositories::{AttendanceRepo, EnrollmentRepo, SessionRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, UrlPath, UrlQuery};
use crate::middleware::rbac::{RequireAdmin, RequireStudent};
use crate::query::PaginationParams;
use crate::response::{created, deleted, ok, ApiJson, Created, Deleted, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response for a session clock-in.
#[derive(Debug, Serialize)]
pub struct ClockInResponse {
    pub session_id: String,
    pub status: String,
    pub clock_in_time: Option<Timestamp>,
}

/// Status counts across all attendance rows.
#[derive(Debug, Serialize)]
pub struct AttendanceStats {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
}

// ---------------------------------------------------------------------------
// Student clock-in / clock-out
// ---------------------------------------------------------------------------

/// POST /api/student/sessions/{id}/clock-in
///
/// The session must accept clock-ins and the student must be actively
/// enrolled in its course. Clocking in again overwrites the earlier time.
pub async fn session_clock_in(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    UrlPath(session_id): UrlPath<String>,
) -> AppResult<ApiJson<ClockInResponse>> {
    let session = SessionRepo::find_by_id(&state.pool, &session_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Session", &session_id))?;

    if !accepts_clock_in(&session.status) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Session is {} and no longer accepts clock-ins",
            session.status
        ))));
    }

    if !EnrollmentRepo::is_active(&state.pool, student.student_id, session.course_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not enrolled in this session's course".into(),
        )));
    }

    let status = clock_in_status(
        state.config.local_now(),
        session.session_date,
        session.start_time,
        state.config.late_grace_mins,
    );

    let row = AttendanceRepo::clock_in_session(
        &state.pool,
        student.student_id,
        &session.session_id,
        session.session_date,
        status,
    )
    .await?;

    tracing::info!(
        student_id = student.student_id,
        session_id = %session.session_id,
        status = %row.status,
        "Clocked in to session"
    );

    Ok(ok(ClockInResponse {
        session_id: session.session_id,
        status: row.status,
        clock_in_time: row.clock_in_time,
    }))
}

/// POST /api/student/sessions/{id}/clock-out
///
/// Sets the clock-out time on the open row; the status is left as is.
pub async fn session_clock_out(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    UrlPath(session_id): UrlPath<String>,
) -> AppResult<ApiJson<Attendance>> {
    let row = AttendanceRepo::clock_out_session(&state.pool, student.student_id, &session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No open attendance record for this session".into()))?;
    tracing::info!(student_id = student.student_id, session_id = %session_id, "Clocked out of session");
    Ok(ok(row))
}

/// POST /api/attendance/clock-in
///
/// Session-less daily clock-in for today.
pub async fn day_clock_in(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<Created<Attendance>> {
    let today = state.config.today();
    let row = AttendanceRepo::clock_in_day(&state.pool, student.student_id, today, STATUS_PRESENT)
        .await?;
    tracing::info!(student_id = student.student_id, date = %today, "Clocked in for the day");
    Ok(created(row))
}

/// POST /api/attendance/clock-out
pub async fn day_clock_out(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<ApiJson<Attendance>> {
    let today = state.config.today();
    let row = AttendanceRepo::clock_out_day(&state.pool, student.student_id, today)
        .await?
        .ok_or_else(|| AppError::NotFound("No open attendance record for today".into()))?;
    tracing::info!(student_id = student.student_id, date = %today, "Clocked out for the day");
    Ok(ok(row))
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// GET /api/admin/attendance?page=&limit=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<PaginationParams>,
) -> AppResult<ApiJson<Page<Attendance>>> {
    let (limit, offset) = page_window(params.page, params.limit);
    let (items, total) = tokio::try_join!(
        AttendanceRepo::list(&state.pool, limit, offset),
        AttendanceRepo::count(&state.pool),
    )?;
    Ok(ok(Page {
        items,
        page: clamp_page(params.page),
        limit,
        total,
    }))
}

/// GET /api/admin/attendance/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiJson<AttendanceStats>> {
    let counts = AttendanceRepo::status_counts(&state.pool).await?;
    Ok(ok(AttendanceStats {
        present: counts.present,
        absent: counts.absent,
        late: counts.late,
    }))
}

/// GET /api/admin/attendance/student/{student_id}
pub async fn list_for_student(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(student_id): UrlPath<DbId>,
) -> AppResult<ApiJson<Vec<Attendance>>> {
    let rows = AttendanceRepo::list_for_student(&state.pool, student_id).await?;
    Ok(ok(rows))
}

/// GET /api/admin/attendance/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Attendance>> {
    let row = AttendanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Attendance", id))?;
    Ok(ok(row))
}

/// POST /api/admin/attendance
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateAttendance>,
) -> AppResult<Created<Attendance>> {
    validate_status(&input.status)?;
    let row = AttendanceRepo::create(&state.pool, &input).await?;
    tracing::info!(attendance_id = row.attendance_id, by = admin.user_id, "Attendance recorded");
    Ok(created(row))
}

/// PUT /api/admin/attendance/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
    JsonBody(input): JsonBody<UpdateAttendance>,
) -> AppResult<ApiJson<Attendance>> {
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    let row = AttendanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Attendance", id))?;
    Ok(ok(row))
}

/// DELETE /api/admin/attendance/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    UrlPath(id): UrlPath<DbId>,
) -> AppResult<ApiJson<Deleted>> {
    if !AttendanceRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Attendance", id).into());
    }
    tracing::info!(attendance_id = id, by = admin.user_id, "Attendance deleted");
    Ok(deleted())
}

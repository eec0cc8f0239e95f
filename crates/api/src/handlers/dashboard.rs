//! Handlers for the admin and student dashboards and the student's own
//! session and attendance views.

use axum::extract::State;
use edulog_core::attendance::{
    attendance_trend, current_streak, rounded_percentage, TREND_WINDOW_DAYS,
};
use edulog_core::error::CoreError;
use edulog_core::pagination::{clamp_page, page_window};
use edulog_db::models::attendance::AttendanceHistoryItem;
use edulog_db::models::dashboard::{DepartmentCount, RecentLog};
use edulog_db::models::session::StudentSession;
use edulog_db::models::student::Student;
use edulog_db::repositories::{AttendanceRepo, DashboardRepo, SessionRepo, StudentRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::UrlQuery;
use crate::middleware::rbac::{RequireAdmin, RequireStudent};
use crate::query::PaginationParams;
use crate::response::{ok, ApiJson, Page};
use crate::state::AppState;

/// Number of entries in the admin dashboard's recent activity list.
const RECENT_LOG_LIMIT: i64 = 5;

/// Number of upcoming sessions shown on the student dashboard.
const DASHBOARD_UPCOMING_LIMIT: i64 = 3;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub department_stats: Vec<DepartmentCount>,
    pub recent_logs: Vec<RecentLog>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_students: i64,
    /// Percentage of students marked present today.
    pub attendance_today: i64,
    pub absent_students: i64,
}

#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub student: Student,
    pub stats: StudentStats,
    pub upcoming_sessions: Vec<StudentSession>,
}

#[derive(Debug, Serialize)]
pub struct StudentStats {
    pub total_sessions: i64,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub attendance_percentage: i64,
    pub current_streak: i64,
    /// Percentage-point change of the attended rate versus the previous window.
    pub attendance_trend: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/dashboard
pub async fn admin_dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiJson<AdminDashboard>> {
    let today = state.config.today();
    let pool = &state.pool;

    let (total_students, present_today, absent_students, department_stats, recent_logs) = tokio::try_join!(
        DashboardRepo::total_students(pool),
        DashboardRepo::present_on(pool, today),
        DashboardRepo::absent_on(pool, today),
        DashboardRepo::department_counts(pool),
        DashboardRepo::recent_logs(pool, today, RECENT_LOG_LIMIT),
    )?;

    Ok(ok(AdminDashboard {
        stats: AdminStats {
            total_students,
            attendance_today: rounded_percentage(present_today, total_students),
            absent_students,
        },
        department_stats,
        recent_logs,
    }))
}

/// GET /api/student/dashboard
pub async fn student_dashboard(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<ApiJson<StudentDashboard>> {
    let pool = &state.pool;
    let today = state.config.today();

    let profile = StudentRepo::find_by_id(pool, student.student_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Student", student.student_id))?;

    let (counts, statuses, windows, upcoming_sessions) = tokio::try_join!(
        AttendanceRepo::status_counts_for_student(pool, student.student_id),
        AttendanceRepo::recent_statuses(pool, student.student_id),
        AttendanceRepo::window_counts(pool, student.student_id, today, TREND_WINDOW_DAYS as i32),
        SessionRepo::list_upcoming_for_student(
            pool,
            student.student_id,
            today,
            Some(DASHBOARD_UPCOMING_LIMIT),
        ),
    )?;

    let stats = StudentStats {
        total_sessions: counts.total,
        present_count: counts.present,
        absent_count: counts.absent,
        late_count: counts.late,
        attendance_percentage: rounded_percentage(counts.present, counts.total),
        current_streak: current_streak(&statuses),
        attendance_trend: attendance_trend(
            windows.recent_attended,
            windows.recent_total,
            windows.prior_attended,
            windows.prior_total,
        ),
    };

    Ok(ok(StudentDashboard {
        student: profile,
        stats,
        upcoming_sessions,
    }))
}

/// GET /api/student/sessions
///
/// Every upcoming scheduled session of the student's active courses.
pub async fn student_sessions(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<ApiJson<Vec<StudentSession>>> {
    let sessions = SessionRepo::list_upcoming_for_student(
        &state.pool,
        student.student_id,
        state.config.today(),
        None,
    )
    .await?;
    Ok(ok(sessions))
}

/// GET /api/student/attendance?page=&limit=
pub async fn student_attendance(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<PaginationParams>,
) -> AppResult<ApiJson<Page<AttendanceHistoryItem>>> {
    let (limit, offset) = page_window(params.page, params.limit);
    let (items, total) = tokio::try_join!(
        AttendanceRepo::history_for_student(&state.pool, student.student_id, limit, offset),
        AttendanceRepo::count_history_for_student(&state.pool, student.student_id),
    )?;
    Ok(ok(Page {
        items,
        page: clamp_page(params.page),
        limit,
        total,
    }))
}

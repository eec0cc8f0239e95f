//! Aggregate queries behind the admin dashboard.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::dashboard::{DepartmentCount, RecentLog};

/// Read-only counts and listings for the admin overview.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Number of student rows.
    pub async fn total_students(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(pool)
            .await
    }

    /// Distinct students with a `Present` row on `day`.
    pub async fn present_on(pool: &PgPool, day: NaiveDate) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT student_id) FROM attendance
             WHERE date = $1 AND status = 'Present'",
        )
        .bind(day)
        .fetch_one(pool)
        .await
    }

    /// Students with no `Present` row on `day`.
    pub async fn absent_on(pool: &PgPool, day: NaiveDate) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students s
             WHERE NOT EXISTS (
                SELECT 1 FROM attendance a
                WHERE a.student_id = s.student_id AND a.date = $1 AND a.status = 'Present'
             )",
        )
        .bind(day)
        .fetch_one(pool)
        .await
    }

    /// Student headcount per department, ordered by department.
    pub async fn department_counts(pool: &PgPool) -> Result<Vec<DepartmentCount>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentCount>(
            "SELECT department, COUNT(*) AS student_count
             FROM students
             GROUP BY department
             ORDER BY department",
        )
        .fetch_all(pool)
        .await
    }

    /// The most recent attendance entries recorded for `day`.
    ///
    /// The course is the session's course, falling back to the student's
    /// home course for session-less rows.
    pub async fn recent_logs(
        pool: &PgPool,
        day: NaiveDate,
        limit: i64,
    ) -> Result<Vec<RecentLog>, sqlx::Error> {
        sqlx::query_as::<_, RecentLog>(
            "SELECT st.name, a.status, a.date,
                    COALESCE(sc.course_name, hc.course_name) AS course
             FROM attendance a
             JOIN students st ON st.student_id = a.student_id
             LEFT JOIN sessions s ON s.session_id = a.session_id
             LEFT JOIN courses sc ON sc.course_id = s.course_id
             LEFT JOIN courses hc ON hc.course_id = st.course_id
             WHERE a.date = $1
             ORDER BY a.clock_in_time DESC NULLS LAST, a.attendance_id DESC
             LIMIT $2",
        )
        .bind(day)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}

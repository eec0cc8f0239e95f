//! Repository for the `attendance` table.
//!
//! Clock-in is an upsert keyed on either `(student_id, session_id)` or,
//! for session-less rows, `(student_id, date)`, so a student holds at most
//! one row per session and one per day.

use chrono::NaiveDate;
use edulog_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{
    Attendance, AttendanceHistoryItem, CreateAttendance, StatusCounts, UpdateAttendance,
    WindowCounts,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "attendance_id, student_id, session_id, date, status, clock_in_time, \
                       clock_out_time, created_at";

/// Status counts over whatever rows the `FROM`/`WHERE` clause selects.
const COUNT_COLUMNS: &str = "COUNT(*) AS total,
        COUNT(*) FILTER (WHERE status = 'Present') AS present,
        COUNT(*) FILTER (WHERE status = 'Absent') AS absent,
        COUNT(*) FILTER (WHERE status = 'Late') AS late";

/// Provides clock-in/out, admin CRUD and aggregate queries for attendance.
pub struct AttendanceRepo;

impl AttendanceRepo {
    // -----------------------------------------------------------------------
    // Clock-in / clock-out
    // -----------------------------------------------------------------------

    /// Record a clock-in for a session, overwriting any previous clock-in
    /// for the same student and session and reopening it.
    pub async fn clock_in_session(
        pool: &PgPool,
        student_id: DbId,
        session_id: &str,
        date: NaiveDate,
        status: &str,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (student_id, session_id, date, status, clock_in_time)
             VALUES ($1, $2, $3, $4, NOW())
             ON CONFLICT (student_id, session_id) DO UPDATE SET
                status = EXCLUDED.status,
                clock_in_time = EXCLUDED.clock_in_time,
                clock_out_time = NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(session_id)
            .bind(date)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Record a session-less clock-in for `date`, overwriting any previous
    /// one for the same student and day.
    pub async fn clock_in_day(
        pool: &PgPool,
        student_id: DbId,
        date: NaiveDate,
        status: &str,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (student_id, date, status, clock_in_time)
             VALUES ($1, $2, $3, NOW())
             ON CONFLICT (student_id, date) WHERE session_id IS NULL DO UPDATE SET
                status = EXCLUDED.status,
                clock_in_time = EXCLUDED.clock_in_time,
                clock_out_time = NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(date)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Set the clock-out time on the student's open row for a session.
    ///
    /// Returns `None` when there is no clocked-in, not yet clocked-out row.
    pub async fn clock_out_session(
        pool: &PgPool,
        student_id: DbId,
        session_id: &str,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET clock_out_time = NOW()
             WHERE student_id = $1 AND session_id = $2
               AND clock_in_time IS NOT NULL AND clock_out_time IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the clock-out time on the student's open session-less row for
    /// `date`.
    pub async fn clock_out_day(
        pool: &PgPool,
        student_id: DbId,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET clock_out_time = NOW()
             WHERE student_id = $1 AND session_id IS NULL AND date = $2
               AND clock_in_time IS NOT NULL AND clock_out_time IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Admin CRUD
    // -----------------------------------------------------------------------

    /// Insert an attendance row as given.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttendance,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance
                (student_id, session_id, date, status, clock_in_time, clock_out_time)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.student_id)
            .bind(&input.session_id)
            .bind(input.date)
            .bind(&input.status)
            .bind(input.clock_in_time)
            .bind(input.clock_out_time)
            .fetch_one(pool)
            .await
    }

    /// Find an attendance row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE attendance_id = $1");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of all attendance rows, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             ORDER BY date DESC, attendance_id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of attendance rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
            .fetch_one(pool)
            .await
    }

    /// Every attendance row of one student, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE student_id = $1
             ORDER BY date DESC, attendance_id DESC"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Update an attendance row. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttendance,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET
                date = COALESCE($2, date),
                status = COALESCE($3, status),
                clock_in_time = COALESCE($4, clock_in_time),
                clock_out_time = COALESCE($5, clock_out_time)
             WHERE attendance_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.status)
            .bind(input.clock_in_time)
            .bind(input.clock_out_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attendance row.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance WHERE attendance_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    /// Status counts across every attendance row.
    pub async fn status_counts(pool: &PgPool) -> Result<StatusCounts, sqlx::Error> {
        let query = format!("SELECT {COUNT_COLUMNS} FROM attendance");
        sqlx::query_as::<_, StatusCounts>(&query)
            .fetch_one(pool)
            .await
    }

    /// Status counts across one student's attendance rows.
    pub async fn status_counts_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<StatusCounts, sqlx::Error> {
        let query = format!("SELECT {COUNT_COLUMNS} FROM attendance WHERE student_id = $1");
        sqlx::query_as::<_, StatusCounts>(&query)
            .bind(student_id)
            .fetch_one(pool)
            .await
    }

    /// The student's statuses, most recent first.
    pub async fn recent_statuses(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT status FROM attendance
             WHERE student_id = $1
             ORDER BY date DESC, clock_in_time DESC NULLS LAST, attendance_id DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Attended/total counts for the `window_days` ending at `today` and the
    /// `window_days` before that.
    pub async fn window_counts(
        pool: &PgPool,
        student_id: DbId,
        today: NaiveDate,
        window_days: i32,
    ) -> Result<WindowCounts, sqlx::Error> {
        sqlx::query_as::<_, WindowCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE date > $2::DATE - $3
                                   AND status IN ('Present', 'Late')) AS recent_attended,
                COUNT(*) FILTER (WHERE date > $2::DATE - $3) AS recent_total,
                COUNT(*) FILTER (WHERE date <= $2::DATE - $3 AND date > $2::DATE - 2 * $3
                                   AND status IN ('Present', 'Late')) AS prior_attended,
                COUNT(*) FILTER (WHERE date <= $2::DATE - $3
                                   AND date > $2::DATE - 2 * $3) AS prior_total
             FROM attendance
             WHERE student_id = $1 AND date <= $2",
        )
        .bind(student_id)
        .bind(today)
        .bind(window_days)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Student history
    // -----------------------------------------------------------------------

    /// One page of the student's session attendance, newest session first.
    pub async fn history_for_student(
        pool: &PgPool,
        student_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceHistoryItem>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceHistoryItem>(
            "SELECT a.attendance_id, a.session_id, a.date, a.status,
                    a.clock_in_time, a.clock_out_time,
                    s.session_date, s.start_time, s.end_time,
                    c.course_name, c.course_code, t.name AS teacher_name
             FROM attendance a
             JOIN sessions s ON s.session_id = a.session_id
             JOIN courses c ON c.course_id = s.course_id
             JOIN teachers t ON t.teacher_id = s.teacher_id
             WHERE a.student_id = $1
             ORDER BY s.session_date DESC, s.start_time DESC, a.attendance_id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(student_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Number of rows [`Self::history_for_student`] pages over.
    pub async fn count_history_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance a
             JOIN sessions s ON s.session_id = a.session_id
             WHERE a.student_id = $1",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await
    }
}

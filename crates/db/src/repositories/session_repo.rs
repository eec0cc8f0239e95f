//! Repository for the `sessions` table.

use chrono::NaiveDate;
use edulog_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session, SessionDetail, StudentSession, UpdateSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "session_id, course_id, teacher_id, session_date, start_time, end_time, \
                       location, status, created_at, updated_at";

/// Columns of [`SessionDetail`], qualified for the course/teacher join.
const DETAIL_COLUMNS: &str = "s.session_id, s.course_id, s.teacher_id, s.session_date, \
                              s.start_time, s.end_time, s.location, s.status, \
                              c.course_code, c.course_name, \
                              t.name AS teacher_name, t.email AS teacher_email";

/// Provides CRUD operations for class sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session in the `scheduled` state.
    ///
    /// A duplicate `session_id` surfaces as a unique violation so the
    /// caller can retry with a fresh id.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions
                (session_id, course_id, teacher_id, session_date, start_time, end_time, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.session_id)
            .bind(input.course_id)
            .bind(input.teacher_id)
            .bind(input.session_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find a session by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE session_id = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a session with its course and teacher.
    pub async fn find_detail(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<SessionDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM sessions s
             JOIN courses c ON c.course_id = s.course_id
             JOIN teachers t ON t.teacher_id = s.teacher_id
             WHERE s.session_id = $1"
        );
        sqlx::query_as::<_, SessionDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sessions with course and teacher, newest first, optionally
    /// narrowed to one course and/or one teacher.
    pub async fn list_details(
        pool: &PgPool,
        course_id: Option<DbId>,
        teacher_id: Option<DbId>,
    ) -> Result<Vec<SessionDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM sessions s
             JOIN courses c ON c.course_id = s.course_id
             JOIN teachers t ON t.teacher_id = s.teacher_id
             WHERE ($1::BIGINT IS NULL OR s.course_id = $1)
               AND ($2::BIGINT IS NULL OR s.teacher_id = $2)
             ORDER BY s.session_date DESC, s.start_time DESC"
        );
        sqlx::query_as::<_, SessionDetail>(&query)
            .bind(course_id)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// Scheduled sessions on or after `from` for courses the student is
    /// actively enrolled in, soonest first, each with the student's own
    /// attendance status. `limit = None` returns all of them.
    pub async fn list_upcoming_for_student(
        pool: &PgPool,
        student_id: DbId,
        from: NaiveDate,
        limit: Option<i64>,
    ) -> Result<Vec<StudentSession>, sqlx::Error> {
        sqlx::query_as::<_, StudentSession>(
            "SELECT s.session_id, s.session_date, s.start_time, s.end_time, s.location, s.status,
                    c.course_id, c.course_code, c.course_name,
                    t.name AS teacher_name,
                    COALESCE(a.status, 'Not Recorded') AS attendance_status
             FROM sessions s
             JOIN courses c ON c.course_id = s.course_id
             JOIN teachers t ON t.teacher_id = s.teacher_id
             JOIN student_courses sc
               ON sc.course_id = s.course_id AND sc.student_id = $1 AND sc.status = 'active'
             LEFT JOIN attendance a
               ON a.session_id = s.session_id AND a.student_id = $1
             WHERE s.session_date >= $2 AND s.status = 'scheduled'
             ORDER BY s.session_date, s.start_time
             LIMIT $3",
        )
        .bind(student_id)
        .bind(from)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Update a session. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateSession,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET
                course_id = COALESCE($2, course_id),
                teacher_id = COALESCE($3, teacher_id),
                session_date = COALESCE($4, session_date),
                start_time = COALESCE($5, start_time),
                end_time = COALESCE($6, end_time),
                location = COALESCE($7, location),
                status = COALESCE($8, status)
             WHERE session_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(input.course_id)
            .bind(input.teacher_id)
            .bind(input.session_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a session. Its attendance rows cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `student_courses` table.

use chrono::NaiveDate;
use edulog_core::enrollment::{ENROLLMENT_ACTIVE, ENROLLMENT_DROPPED};
use edulog_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::Course;
use crate::models::enrollment::{EnrolledCourse, Enrollment};

/// Provides enrollment operations for students.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Find the enrollment row for a student/course pair, in any state.
    pub async fn find(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT student_id, course_id, enrollment_date, status
             FROM student_courses
             WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await
    }

    /// Whether the student is actively enrolled in the course.
    pub async fn is_active(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM student_courses
                WHERE student_id = $1 AND course_id = $2 AND status = 'active'
             )",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }

    /// Enroll a student, reactivating a dropped enrollment if one exists.
    pub async fn enroll(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
        on: NaiveDate,
    ) -> Result<Enrollment, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            "INSERT INTO student_courses (student_id, course_id, enrollment_date, status)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (student_id, course_id)
             DO UPDATE SET status = EXCLUDED.status, enrollment_date = EXCLUDED.enrollment_date
             RETURNING student_id, course_id, enrollment_date, status",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(on)
        .bind(ENROLLMENT_ACTIVE)
        .fetch_one(pool)
        .await
    }

    /// Mark an active enrollment as dropped.
    ///
    /// Returns `false` if the student had no active enrollment in the course.
    pub async fn drop_course(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE student_courses SET status = $3
             WHERE student_id = $1 AND course_id = $2 AND status = $4",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(ENROLLMENT_DROPPED)
        .bind(ENROLLMENT_ACTIVE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Courses the student is actively enrolled in.
    pub async fn list_enrolled(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
        sqlx::query_as::<_, EnrolledCourse>(
            "SELECT c.course_id, c.course_code, c.course_name, c.department,
                    sc.enrollment_date, sc.status
             FROM student_courses sc
             JOIN courses c ON c.course_id = sc.course_id
             WHERE sc.student_id = $1 AND sc.status = 'active'
             ORDER BY c.course_name",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Courses the student is not actively enrolled in.
    pub async fn list_available(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "SELECT c.course_id, c.course_code, c.course_name, c.department,
                    c.created_at, c.updated_at
             FROM courses c
             WHERE NOT EXISTS (
                SELECT 1 FROM student_courses sc
                WHERE sc.course_id = c.course_id
                  AND sc.student_id = $1
                  AND sc.status = 'active'
             )
             ORDER BY c.course_name",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }
}

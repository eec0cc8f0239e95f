//! Repository for the `courses` table.

use edulog_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseSummary, CreateCourse, UpdateCourse};
use crate::repositories::contains_pattern;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "course_id, course_code, course_name, department, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (course_code, course_name, department)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.course_code)
            .bind(&input.course_name)
            .bind(&input.department)
            .fetch_one(pool)
            .await
    }

    /// Find a course by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE course_id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by its unique code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE course_code = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List courses ordered by name.
    ///
    /// `search` matches a case-insensitive substring of code, name or
    /// department; `department` is an exact match.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        department: Option<&str>,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::TEXT IS NULL
                    OR course_name ILIKE $1 ESCAPE '\\'
                    OR course_code ILIKE $1 ESCAPE '\\'
                    OR department ILIKE $1 ESCAPE '\\')
               AND ($2::TEXT IS NULL OR department = $2)
             ORDER BY course_name, course_id"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(search.map(contains_pattern))
            .bind(department)
            .fetch_all(pool)
            .await
    }

    /// Id, code and name of every course.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<CourseSummary>, sqlx::Error> {
        sqlx::query_as::<_, CourseSummary>(
            "SELECT course_id, course_code, course_name FROM courses ORDER BY course_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                course_code = COALESCE($2, course_code),
                course_name = COALESCE($3, course_name),
                department = COALESCE($4, department)
             WHERE course_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.course_code)
            .bind(&input.course_name)
            .bind(&input.department)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course. Enrollments cascade; fails with a foreign key
    /// violation while the course still has sessions.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

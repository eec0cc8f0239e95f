//! Repository for the `teachers` table.

use edulog_core::types::DbId;
use sqlx::PgPool;

use crate::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use crate::repositories::contains_pattern;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "teacher_id, name, email, department, created_at, updated_at";

/// Provides CRUD operations for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Insert a new teacher, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let query = format!(
            "INSERT INTO teachers (name, email, department)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .fetch_one(pool)
            .await
    }

    /// Find a teacher by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE teacher_id = $1");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a teacher by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List teachers ordered by name, optionally narrowed by a
    /// case-insensitive substring of name, email or department.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teachers
             WHERE $1::TEXT IS NULL
                OR name ILIKE $1 ESCAPE '\\'
                OR email ILIKE $1 ESCAPE '\\'
                OR department ILIKE $1 ESCAPE '\\'
             ORDER BY name, teacher_id"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(search.map(contains_pattern))
            .fetch_all(pool)
            .await
    }

    /// Update a teacher. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeacher,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "UPDATE teachers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                department = COALESCE($4, department)
             WHERE teacher_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .fetch_optional(pool)
            .await
    }

    /// Delete a teacher. Fails with a foreign key violation while the
    /// teacher still has sessions.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teachers WHERE teacher_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `students` table.

use edulog_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student, StudentWithCourse, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "student_id, name, email, department, course_id, year_of_study, phone, \
                       created_at, updated_at";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (name, email, department, course_id, year_of_study, phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .bind(input.course_id)
            .bind(input.year_of_study)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a student by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all students with their home course name, ordered by name.
    pub async fn list_with_course(pool: &PgPool) -> Result<Vec<StudentWithCourse>, sqlx::Error> {
        sqlx::query_as::<_, StudentWithCourse>(
            "SELECT s.student_id, s.name, s.email, s.department, s.year_of_study, s.phone,
                    s.course_id, c.course_name
             FROM students s
             LEFT JOIN courses c ON c.course_id = s.course_id
             ORDER BY s.name, s.student_id",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                department = COALESCE($4, department),
                course_id = COALESCE($5, course_id),
                year_of_study = COALESCE($6, year_of_study),
                phone = COALESCE($7, phone)
             WHERE student_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .bind(input.course_id)
            .bind(input.year_of_study)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Update the contact details a student may edit themselves, the linked
    /// account's email and, when given, its password hash, in one
    /// transaction.
    ///
    /// Returns `None` if the student does not exist.
    pub async fn update_contact(
        pool: &PgPool,
        student_id: DbId,
        user_id: DbId,
        email: &str,
        phone: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Option<Student>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE students SET email = $2, phone = COALESCE($3, phone)
             WHERE student_id = $1
             RETURNING {COLUMNS}"
        );
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(student_id)
            .bind(email)
            .bind(phone)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(student) = student else {
            return Ok(None);
        };

        // The account email mirrors the student email.
        sqlx::query(
            "UPDATE users SET email = $2, password_hash = COALESCE($3, password_hash)
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(email)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(student))
    }

    /// Delete a student. Attendance and enrollments cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

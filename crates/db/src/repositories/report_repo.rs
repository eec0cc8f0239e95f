//! Repository for the `reports` table and the filtered reporting view.

use sqlx::PgPool;

use crate::models::report::{CreateReport, Report, ReportFilter, ReportRow};
use crate::repositories::contains_pattern;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "report_id, date, user_id, user_name, role, category, amount, \
                       description, created_at";

/// Base of the reporting view: every report with the attendance, student
/// and course context of its author.
const VIEW_SELECT: &str = "SELECT r.report_id, r.date, r.user_id, r.user_name, r.role, \
                                  r.category, r.amount, r.description, \
                                  a.status, c.course_name, s.name AS student_name, \
                                  u.role AS user_role \
                           FROM reports r \
                           LEFT JOIN users u ON u.user_id = r.user_id \
                           LEFT JOIN students s ON s.student_id = u.student_id \
                           LEFT JOIN courses c ON c.course_id = s.course_id \
                           LEFT JOIN attendance a ON a.student_id = s.student_id AND a.date = r.date";

/// Provides report creation and the filtered listing.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a report, copying the author's username and role from `users`.
    ///
    /// Returns `None` if `input.user_id` does not exist.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (date, user_id, user_name, role, category, amount, description)
             SELECT $1, u.user_id, u.username, u.role, $3, $4, $5
             FROM users u WHERE u.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.date)
            .bind(input.user_id)
            .bind(&input.category)
            .bind(input.amount)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// List the reporting view, newest first, narrowed by every present
    /// field of `filter`.
    pub async fn list(pool: &PgPool, filter: &ReportFilter) -> Result<Vec<ReportRow>, sqlx::Error> {
        let query = build_list_query(filter);
        tracing::debug!(%query, "Listing reports");

        // Bind order must match the predicate order in `build_list_query`.
        let mut q = sqlx::query_as::<_, ReportRow>(&query);
        if let Some(start) = filter.start_date {
            q = q.bind(start);
        }
        if let Some(end) = filter.end_date {
            q = q.bind(end);
        }
        if let Some(ref role) = filter.role {
            q = q.bind(role);
        }
        if let Some(ref course) = filter.course_name {
            q = q.bind(course);
        }
        if let Some(ref status) = filter.status {
            q = q.bind(status);
        }
        if let Some(ref name) = filter.student_name {
            q = q.bind(contains_pattern(name));
        }

        q.fetch_all(pool).await
    }
}

/// Build the reporting query with one numbered placeholder per present
/// filter field.
fn build_list_query(filter: &ReportFilter) -> String {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx: usize = 1;

    if filter.start_date.is_some() {
        conditions.push(format!("r.date >= ${param_idx}"));
        param_idx += 1;
    }
    if filter.end_date.is_some() {
        conditions.push(format!("r.date <= ${param_idx}"));
        param_idx += 1;
    }
    if filter.role.is_some() {
        conditions.push(format!("u.role = ${param_idx}"));
        param_idx += 1;
    }
    if filter.course_name.is_some() {
        conditions.push(format!("c.course_name = ${param_idx}"));
        param_idx += 1;
    }
    if filter.status.is_some() {
        conditions.push(format!("a.status = ${param_idx}"));
        param_idx += 1;
    }
    if filter.student_name.is_some() {
        conditions.push(format!("s.name ILIKE ${param_idx} ESCAPE '\\'"));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    format!("{VIEW_SELECT}{where_clause} ORDER BY r.date DESC, r.report_id DESC")
}

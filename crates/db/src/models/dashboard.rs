//! Aggregate rows for the admin dashboard.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Number of students per department.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub student_count: i64,
}

/// One of today's attendance entries for the recent-activity list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentLog {
    pub name: String,
    pub status: String,
    pub date: NaiveDate,
    pub course: Option<String>,
}

//! Report records and the filtered reporting view.

use chrono::NaiveDate;
use edulog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub report_id: DbId,
    pub date: NaiveDate,
    pub user_id: DbId,
    pub user_name: String,
    pub role: String,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// A report joined with the attendance/student/course context of its user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportRow {
    pub report_id: DbId,
    pub date: NaiveDate,
    pub user_id: DbId,
    pub user_name: String,
    pub role: String,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub status: Option<String>,
    pub course_name: Option<String>,
    pub student_name: Option<String>,
    pub user_role: Option<String>,
}

/// DTO for recording a report.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReport {
    pub date: NaiveDate,
    pub user_id: DbId,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(default)]
    pub amount: f64,
    pub description: Option<String>,
}

/// Optional filters for the reporting view. Every present field narrows
/// the result set.
#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub role: Option<String>,
    pub course_name: Option<String>,
    pub status: Option<String>,
    pub student_name: Option<String>,
}

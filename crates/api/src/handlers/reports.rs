//! Handlers for the `/reports` resource.

use axum::extract::State;
use chrono::NaiveDate;
use edulog_core::attendance;
use edulog_core::error::CoreError;
use edulog_core::roles::validate_role;
use edulog_db::models::report::{CreateReport, Report, ReportFilter, ReportRow};
use edulog_db::repositories::ReportRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, UrlQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, ok, ApiJson, Created};
use crate::state::AppState;

/// Query parameters for `GET /api/reports`. Blank values are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub role_filter: Option<String>,
    pub course_filter: Option<String>,
    pub status_filter: Option<String>,
    pub student_name_filter: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(name: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    present(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("{name} must be a date (YYYY-MM-DD)")))
        })
        .transpose()
}

impl ReportQuery {
    /// Validate the raw parameters and turn them into a repository filter.
    pub fn into_filter(self) -> AppResult<ReportFilter> {
        let start_date = parse_date("startDate", self.start_date)?;
        let end_date = parse_date("endDate", self.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::BadRequest(
                    "startDate must not be after endDate".into(),
                ));
            }
        }

        let role = present(self.role_filter);
        if let Some(ref role) = role {
            validate_role(role)?;
        }
        let status = present(self.status_filter);
        if let Some(ref status) = status {
            attendance::validate_status(status)?;
        }

        Ok(ReportFilter {
            start_date,
            end_date,
            role,
            course_name: present(self.course_filter),
            status,
            student_name: present(self.student_name_filter),
        })
    }
}

/// GET /api/reports
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<ReportQuery>,
) -> AppResult<ApiJson<Vec<ReportRow>>> {
    let filter = params.into_filter()?;
    let rows = ReportRepo::list(&state.pool, &filter).await?;
    Ok(ok(rows))
}

/// POST /api/reports
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateReport>,
) -> AppResult<Created<Report>> {
    input.validate()?;
    let report = ReportRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("User", input.user_id))?;
    tracing::info!(report_id = report.report_id, by = admin.user_id, "Report created");
    Ok(created(report))
}

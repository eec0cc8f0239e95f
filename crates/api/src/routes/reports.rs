//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports` (admin only).
///
/// ```text
/// GET  /  -> list (?startDate, ?endDate, ?roleFilter, ?courseFilter,
///                  ?statusFilter, ?studentNameFilter)
/// POST /  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(reports::list).post(reports::create))
}

//! Route definitions for attendance.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance` (student role).
///
/// ```text
/// POST /clock-in   -> day_clock_in
/// POST /clock-out  -> day_clock_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clock-in", post(attendance::day_clock_in))
        .route("/clock-out", post(attendance::day_clock_out))
}

/// Routes mounted at `/admin/attendance`.
///
/// ```text
/// GET    /                       -> list (?page, ?limit)
/// POST   /                       -> create
/// GET    /stats                  -> stats
/// GET    /student/{student_id}   -> list_for_student
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list).post(attendance::create))
        .route("/stats", get(attendance::stats))
        .route("/student/{student_id}", get(attendance::list_for_student))
        .route(
            "/{id}",
            get(attendance::get_by_id)
                .put(attendance::update)
                .delete(attendance::delete),
        )
}

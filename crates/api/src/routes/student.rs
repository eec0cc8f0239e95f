//! Route definitions for the student portal.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{attendance, dashboard, enrollment, profile};
use crate::state::AppState;

/// Routes mounted at `/student`.
///
/// ```text
/// GET    /dashboard                -> student_dashboard
/// GET    /sessions                 -> student_sessions
/// POST   /sessions/{id}/clock-in   -> session_clock_in
/// POST   /sessions/{id}/clock-out  -> session_clock_out
/// GET    /attendance               -> student_attendance (?page, ?limit)
/// GET    /profile                  -> get_student_profile
/// PUT    /profile                  -> update_student_profile
/// GET    /courses/enrolled         -> enrolled
/// GET    /courses/available        -> available
/// POST   /courses/enroll           -> enroll
/// DELETE /courses/drop/{course_id} -> drop_course
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::student_dashboard))
        .route("/sessions", get(dashboard::student_sessions))
        .route("/sessions/{id}/clock-in", post(attendance::session_clock_in))
        .route("/sessions/{id}/clock-out", post(attendance::session_clock_out))
        .route("/attendance", get(dashboard::student_attendance))
        .route(
            "/profile",
            get(profile::get_student_profile).put(profile::update_student_profile),
        )
        .route("/courses/enrolled", get(enrollment::enrolled))
        .route("/courses/available", get(enrollment::available))
        .route("/courses/enroll", post(enrollment::enroll))
        .route("/courses/drop/{course_id}", delete(enrollment::drop_course))
}

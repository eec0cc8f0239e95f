pub mod admin;
pub mod attendance;
pub mod auth;
pub mod courses;
pub mod health;
pub mod reports;
pub mod sessions;
pub mod student;
pub mod students;
pub mod teachers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                   login (public)
/// /register                                register (public)
///
/// /courses                                 course summaries (any role)
/// /attendance/clock-in                     daily clock-in (student)
/// /attendance/clock-out                    daily clock-out (student)
/// /reports                                 list, create (admin)
///
/// /admin/dashboard                         overview counts
/// /admin/profile                           get, update own profile
/// /admin/teachers[/{id}]                   CRUD
/// /admin/courses[/{id}]                    CRUD
/// /admin/sessions[/{id}]                   CRUD
/// /admin/students[/{id}]                   CRUD
/// /admin/attendance[/{id}]                 CRUD, paginated list
/// /admin/attendance/stats                  status counts
/// /admin/attendance/student/{student_id}   one student's rows
///
/// /student/dashboard                       stats, upcoming sessions
/// /student/sessions                        upcoming sessions
/// /student/sessions/{id}/clock-in          session clock-in
/// /student/sessions/{id}/clock-out         session clock-out
/// /student/attendance                      paginated history
/// /student/profile                         get, update own profile
/// /student/courses/...                     enrolled, available, enroll, drop
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .merge(admin::router())
        .nest("/teachers", teachers::router())
        .nest("/courses", courses::router())
        .nest("/sessions", sessions::router())
        .nest("/students", students::router())
        .nest("/attendance", attendance::admin_router());

    Router::new()
        .merge(auth::router())
        .nest("/courses", courses::public_router())
        .nest("/attendance", attendance::router())
        .nest("/reports", reports::router())
        .nest("/admin", admin)
        .nest("/student", student::router())
}

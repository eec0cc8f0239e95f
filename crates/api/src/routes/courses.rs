//! Route definitions for courses.

use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/admin/courses`.
///
/// ```text
/// GET    /       -> list (?search, ?department)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list).post(courses::create))
        .route(
            "/{id}",
            get(courses::get_by_id)
                .put(courses::update)
                .delete(courses::delete),
        )
}

/// Routes mounted at `/courses` (any signed-in user).
///
/// ```text
/// GET /  -> list_summaries
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(courses::list_summaries))
}

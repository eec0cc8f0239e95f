//! Route definitions for the `/admin/sessions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/admin/sessions`.
///
/// ```text
/// GET    /       -> list (?course_id, ?teacher_id)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sessions::list).post(sessions::create))
        .route(
            "/{id}",
            get(sessions::get_by_id)
                .put(sessions::update)
                .delete(sessions::delete),
        )
}

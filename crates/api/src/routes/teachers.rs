//! Route definitions for the `/admin/teachers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::teachers;
use crate::state::AppState;

/// Routes mounted at `/admin/teachers`.
///
/// ```text
/// GET    /       -> list (?search)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teachers::list).post(teachers::create))
        .route(
            "/{id}",
            get(teachers::get_by_id)
                .put(teachers::update)
                .delete(teachers::delete),
        )
}

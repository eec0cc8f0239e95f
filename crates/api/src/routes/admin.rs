//! Route definitions for the admin's own views.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, profile};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /dashboard  -> admin_dashboard
/// GET /profile    -> get_admin_profile
/// PUT /profile    -> update_admin_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::admin_dashboard))
        .route(
            "/profile",
            get(profile::get_admin_profile).put(profile::update_admin_profile),
        )
}

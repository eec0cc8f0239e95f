use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted, config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: edulog_db::DbPool,
    /// Server configuration (JWT settings, lateness grace, school clock).
    pub config: Arc<ServerConfig>,
}

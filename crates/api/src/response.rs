//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "success": true, "data": ... }`
//! envelope. Errors use the matching shape produced by
//! [`AppError`](crate::error::AppError).

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Handler return type for a 200 response.
pub type ApiJson<T> = Json<DataResponse<T>>;

/// Handler return type for a 201 response.
pub type Created<T> = (StatusCode, Json<DataResponse<T>>);

/// Wrap `data` in the envelope with status 200.
pub fn ok<T: Serialize>(data: T) -> ApiJson<T> {
    Json(DataResponse::new(data))
}

/// Wrap `data` in the envelope with status 201.
pub fn created<T: Serialize>(data: T) -> Created<T> {
    (StatusCode::CREATED, Json(DataResponse::new(data)))
}

/// Payload returned by every DELETE endpoint.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// Shorthand for a successful delete.
pub fn deleted() -> ApiJson<Deleted> {
    ok(Deleted { deleted: true })
}

/// One page of a paginated listing.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

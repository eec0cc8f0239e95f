//! Page/limit pagination helpers for list endpoints.

/// Default page size when the client does not send `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Resolve `?page=&limit=` into a `(limit, offset)` pair for SQL.
pub fn page_window(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let page = clamp_page(page);
    (limit, (page - 1).saturating_mul(limit))
}

//! Handlers for the signed-in user's own profile (`/admin/profile`,
//! `/student/profile`).

use axum::extract::State;
use edulog_core::error::CoreError;
use edulog_core::types::DbId;
use edulog_db::models::student::Student;
use edulog_db::repositories::{StudentRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::{RequireAdmin, RequireStudent};
use crate::response::{ok, ApiJson};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AdminProfile {
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Request body for `PUT /api/admin/profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdminProfile {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: Option<String>,
}

/// Request body for `PUT /api/student/profile`.
///
/// Identity fields are not accepted here.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentProfile {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub phone: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Hash a replacement password, treating a blank value as "unchanged".
fn hash_new_password(password: Option<&str>) -> AppResult<Option<String>> {
    let Some(password) = password.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    Ok(Some(hash))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/profile
pub async fn get_admin_profile(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiJson<AdminProfile>> {
    let user = UserRepo::find_by_id(&state.pool, admin.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", admin.user_id))?;
    Ok(ok(AdminProfile {
        user_id: user.user_id,
        name: user.username,
        email: user.email,
        role: user.role,
    }))
}

/// PUT /api/admin/profile
///
/// Email and optional password change together or not at all.
pub async fn update_admin_profile(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UpdateAdminProfile>,
) -> AppResult<ApiJson<AdminProfile>> {
    input.validate()?;
    let password_hash = hash_new_password(input.password.as_deref())?;

    let updated = UserRepo::update_credentials(
        &state.pool,
        admin.user_id,
        &input.email,
        password_hash.as_deref(),
    )
    .await?;
    if !updated {
        return Err(CoreError::not_found("User", admin.user_id).into());
    }

    tracing::info!(
        user_id = admin.user_id,
        password_changed = password_hash.is_some(),
        "Admin profile updated"
    );
    get_admin_profile(RequireAdmin(admin), State(state)).await
}

/// GET /api/student/profile
pub async fn get_student_profile(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<ApiJson<Student>> {
    let profile = StudentRepo::find_by_id(&state.pool, student.student_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Student", student.student_id))?;
    Ok(ok(profile))
}

/// PUT /api/student/profile
///
/// Contact details and optional password change together or not at all.
pub async fn update_student_profile(
    RequireStudent(student): RequireStudent,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UpdateStudentProfile>,
) -> AppResult<ApiJson<Student>> {
    input.validate()?;
    let password_hash = hash_new_password(input.password.as_deref())?;

    let profile = StudentRepo::update_contact(
        &state.pool,
        student.student_id,
        student.user_id,
        &input.email,
        input.phone.as_deref(),
        password_hash.as_deref(),
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Student", student.student_id))?;

    tracing::info!(
        student_id = student.student_id,
        password_changed = password_hash.is_some(),
        "Student profile updated"
    );
    Ok(ok(profile))
}

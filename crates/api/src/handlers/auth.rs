//! Handlers for login and account registration.

use axum::extract::State;
use edulog_core::error::CoreError;
use edulog_core::roles::{validate_role, ROLE_ADMIN, ROLE_STUDENT};
use edulog_core::types::DbId;
use edulog_db::models::user::{CreateUser, UserResponse};
use edulog_db::repositories::{StudentRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_dummy_password, verify_password,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::response::{created, ok, ApiJson, Created};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub student_id: Option<DbId>,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Request body for `POST /api/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "username must be 3-64 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    /// Required for student accounts.
    pub student_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with username + password. Returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<ApiJson<LoginResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let Some(user) = UserRepo::find_by_username(&state.pool, &input.username).await? else {
        tracing::warn!(username = %input.username, "Login for unknown user");
        verify_dummy_password(&input.password);
        return Err(invalid());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(user_id = user.user_id, "Login with wrong password");
        return Err(invalid());
    }

    let token = generate_access_token(user.user_id, &user.role, user.student_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.user_id, role = %user.role, "User logged in");

    Ok(ok(LoginResponse {
        token,
        role: user.role,
        student_id: user.student_id,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

/// POST /api/register
///
/// Create an account. Student accounts must link to an existing student row
/// that has no account yet; admin accounts can only be self-registered
/// while no admin exists.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = input.role;
    validate_role(&role)?;

    if role == ROLE_ADMIN && UserRepo::role_exists(&state.pool, ROLE_ADMIN).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "An administrator already exists".into(),
        )));
    }

    let student_id = if role == ROLE_STUDENT {
        let student_id = input.student_id.ok_or_else(|| {
            AppError::BadRequest("student_id is required for student accounts".into())
        })?;
        StudentRepo::find_by_id(&state.pool, student_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Student", student_id))?;
        if UserRepo::find_by_student_id(&state.pool, student_id)
            .await?
            .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(
                "Student already has an account".into(),
            )));
        }
        Some(student_id)
    } else {
        None
    };

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role,
            student_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, role = %user.role, "User registered");

    Ok(created(UserResponse::from(&user)))
}

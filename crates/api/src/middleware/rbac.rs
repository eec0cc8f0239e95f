//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Use these in handlers to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use edulog_core::error::CoreError;
use edulog_core::roles::{ROLE_ADMIN, ROLE_STUDENT};
use edulog_core::types::DbId;
use edulog_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            tracing::warn!(user_id = user.user_id, role = %user.role, "Admin route refused");
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// A student account together with the student row it is linked to.
#[derive(Debug, Clone, Copy)]
pub struct StudentUser {
    pub user_id: DbId,
    pub student_id: DbId,
}

/// Requires the `student` role and an account linked to a student row.
///
/// The link is read from `users.student_id` on every request so a student
/// deleted or relinked after the token was issued is not acted on.
pub struct RequireStudent(pub StudentUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_STUDENT {
            tracing::warn!(user_id = user.user_id, role = %user.role, "Student route refused");
            return Err(AppError::Core(CoreError::Forbidden(
                "Student role required".into(),
            )));
        }

        let account = UserRepo::find_by_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            })?;

        let student_id = account.student_id.ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Account is not linked to a student record".into(),
            ))
        })?;

        Ok(RequireStudent(StudentUser {
            user_id: user.user_id,
            student_id,
        }))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for routes
/// open to every signed-in role.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

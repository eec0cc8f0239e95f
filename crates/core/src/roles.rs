//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_TEACHER: &str = "teacher";

/// All roles a user account may hold.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STUDENT, ROLE_TEACHER];

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}

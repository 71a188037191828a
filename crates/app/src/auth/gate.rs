//! Role checks.

use crate::auth::{AuthError, Identity, Role};

/// Check that `identity` holds exactly `required`.
///
/// # Errors
///
/// Returns [`AuthError::MissingRole`] when the identity has no role and
/// [`AuthError::Forbidden`] when it holds a different one.
pub fn authorize(identity: &Identity, required: Role) -> Result<(), AuthError> {
    match identity.role {
        None => Err(AuthError::MissingRole),
        Some(actual) if actual == required => Ok(()),
        Some(actual) => Err(AuthError::Forbidden { required, actual }),
    }
}

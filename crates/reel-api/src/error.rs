//! Error types for the service layer.
//!
//! `ServiceError` is the surface callers see. Five categories, each a
//! distinct outcome:
//!
//! - `Unauthenticated` - no valid session
//! - `Forbidden` - a session, but not enough privilege
//! - `NotFound` - the named entity doesn't exist (or the caller may not
//!   know it exists)
//! - `Invalid` - the request itself is malformed or disallowed
//! - `Internal` - storage or infrastructure failure
//!
//! Database errors are mapped per call site, not blanket-converted:
//! the same `DbError::NotFound` is a `NotFound` in one operation and an
//! `Internal` invariant break in another.

use reel_core::authz::AuthError;
use reel_core::error::{CoreError, ValidationError};
use reel_core::Role;

/// Service layer errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: requires {required} role")]
    Forbidden { required: Role },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Unauthenticated => ServiceError::Unauthenticated,
            AuthError::Forbidden { required } => ServiceError::Forbidden { required },
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::Invalid(error.to_string())
    }
}

impl From<CoreError> for ServiceError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MovieNotFound(id) => ServiceError::NotFound(format!("movie {}", id)),
            CoreError::OrderNotFound(id) => ServiceError::NotFound(format!("order {}", id)),
            e @ CoreError::NotReturnable { .. } => ServiceError::Invalid(e.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Convenience type alias for Results with ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_mapping() {
        let err: ServiceError = AuthError::Unauthenticated.into();
        assert!(matches!(err, ServiceError::Unauthenticated));

        let err: ServiceError = AuthError::Forbidden {
            required: Role::Admin,
        }
        .into();
        assert!(matches!(
            err,
            ServiceError::Forbidden {
                required: Role::Admin
            }
        ));
    }

    #[test]
    fn test_validation_error_maps_to_invalid() {
        let err: ServiceError = ValidationError::UnknownField {
            field: "password".to_string(),
        }
        .into();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }
}

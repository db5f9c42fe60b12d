//! # Authorization Gate
//!
//! The single role check used as a precondition by every privileged
//! operation in the system.
//!
//! ## Why One Gate?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Authorization Flow                                  │
//! │                                                                         │
//! │  Request + Option<Principal>                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  authorize(principal, required_role)  ← THIS MODULE                    │
//! │       │                                                                 │
//! │       ├── None?              → AuthError::Unauthenticated              │
//! │       ├── role below needed? → AuthError::Forbidden                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Operation proceeds (reads/writes happen only after this)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scattering `if user.role == Admin` checks across handlers is how role
//! logic drifts apart. Everything funnels through [`authorize`] instead.
//! The gate is a pure decision function: two inputs, no state, no side
//! effects. Callers must not proceed on failure.

use thiserror::Error;

use crate::types::{Principal, Role};

// =============================================================================
// Auth Error
// =============================================================================

/// Authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No principal was supplied (anonymous request).
    #[error("authentication required")]
    Unauthenticated,

    /// The principal's role does not meet the requirement.
    #[error("requires {required} role")]
    Forbidden { required: Role },
}

// =============================================================================
// The Gate
// =============================================================================

/// Decides whether a (possibly absent) principal may perform an action
/// requiring `required`.
///
/// ## Rules
/// - Absent principal → [`AuthError::Unauthenticated`]
/// - `Role::Customer` requirement → any authenticated principal passes
/// - `Role::Admin` requirement → only admins pass
///
/// ## Example
/// ```rust
/// use reel_core::authz::authorize;
/// use reel_core::types::{Principal, Role};
///
/// let admin = Principal {
///     id: "u-1".into(),
///     username: "ada".into(),
///     email: "ada@example.com".into(),
///     role: Role::Admin,
/// };
///
/// assert!(authorize(Some(&admin), Role::Admin).is_ok());
/// assert!(authorize(None, Role::Customer).is_err());
/// ```
pub fn authorize(principal: Option<&Principal>, required: Role) -> Result<(), AuthError> {
    let principal = principal.ok_or(AuthError::Unauthenticated)?;

    if principal.role.meets(required) {
        Ok(())
    } else {
        Err(AuthError::Forbidden { required })
    }
}

/// Non-failing admin check.
///
/// Used where privilege changes behavior instead of denying it: movie
/// listing clamps the availability filter for everyone who fails this.
#[inline]
pub fn is_admin(principal: Option<&Principal>) -> bool {
    matches!(
        principal,
        Some(Principal {
            role: Role::Admin,
            ..
        })
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            id: "u-1".to_string(),
            username: "test".to_string(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_anonymous_is_unauthenticated() {
        assert_eq!(
            authorize(None, Role::Customer),
            Err(AuthError::Unauthenticated)
        );
        assert_eq!(authorize(None, Role::Admin), Err(AuthError::Unauthenticated));
    }

    #[test]
    fn test_customer_requirement_accepts_any_principal() {
        let customer = principal(Role::Customer);
        let admin = principal(Role::Admin);

        assert!(authorize(Some(&customer), Role::Customer).is_ok());
        assert!(authorize(Some(&admin), Role::Customer).is_ok());
    }

    #[test]
    fn test_admin_requirement_rejects_customer() {
        let customer = principal(Role::Customer);
        assert_eq!(
            authorize(Some(&customer), Role::Admin),
            Err(AuthError::Forbidden {
                required: Role::Admin
            })
        );

        let admin = principal(Role::Admin);
        assert!(authorize(Some(&admin), Role::Admin).is_ok());
    }

    #[test]
    fn test_is_admin() {
        let customer = principal(Role::Customer);
        let admin = principal(Role::Admin);

        assert!(is_admin(Some(&admin)));
        assert!(!is_admin(Some(&customer)));
        assert!(!is_admin(None));
    }
}

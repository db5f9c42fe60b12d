//! # Error Types
//!
//! Domain-specific error types for reel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  reel-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── AuthError        - Authorization failures (authz module)          │
//! │                                                                         │
//! │  reel-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  reel-api errors (separate crate)                                      │
//! │  └── ServiceError     - What callers ultimately see                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ServiceError → Caller   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (movie ID, field name, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Movie cannot be found.
    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Trying to return a purchase (purchases have no return path)
    /// - Trying to return an order a second time
    #[error("Order {order_id} cannot be returned: {reason}")]
    NotReturnable { order_id: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when untrusted input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be non-negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID, invalid boolean).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field name is not a member of the entity's updatable attribute set.
    ///
    /// ## Security Control
    /// Dynamic "set field X to value Y" updates are only ever applied to a
    /// closed, enumerated attribute set. Any other name is rejected here,
    /// before it can reach a query.
    #[error("'{field}' is not an updatable movie attribute")]
    UnknownField { field: String },

    /// String is not a member of a closed enum (role, order type, ...).
    #[error("'{value}' is not a valid {kind}")]
    UnknownVariant { kind: &'static str, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

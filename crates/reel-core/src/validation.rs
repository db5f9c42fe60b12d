//! # Validation Module
//!
//! Input validation for Reel: the movie field-update whitelist and the
//! scalar validators used before anything touches storage.
//!
//! ## The Field-Update Whitelist
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │        "set field X to value Y" — without dynamic attribute access      │
//! │                                                                         │
//! │  Caller sends: field_name = "rental_price", value = "499"              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MovieUpdate::parse(field_name, value)  ← THIS MODULE                  │
//! │       │                                                                 │
//! │       ├── name not in the closed set? → ValidationError::UnknownField  │
//! │       ├── value fails to parse?       → ValidationError::InvalidFormat │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MovieUpdate::RentalPriceCents(499)  — a typed, statically known       │
//! │  variant. The storage layer matches on it and each arm carries its     │
//! │  own fixed column name. Caller text NEVER becomes a query fragment.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is a security control, not a convenience check: the whitelist
//! exists specifically to prevent constructing unsafe dynamic update
//! targets.

use crate::error::ValidationError;
use crate::MAX_LIST_LIMIT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Movie Field Updates
// =============================================================================

/// A single validated movie field change.
///
/// The closed, enumerated set of updatable movie attributes, each
/// variant carrying its already-typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieUpdate {
    Title(String),
    Stock(i64),
    RentalPriceCents(i64),
    SalePriceCents(i64),
    Availability(bool),
    Images(Vec<String>),
}

impl MovieUpdate {
    /// The updatable attribute names, as callers spell them.
    pub const FIELDS: &'static [&'static str] = &[
        "title",
        "stock",
        "rental_price",
        "sale_price",
        "availability",
        "images",
    ];

    /// Parses an untrusted `(field_name, value)` pair into a typed update.
    ///
    /// ## Errors
    /// - [`ValidationError::UnknownField`] for any name outside
    ///   [`MovieUpdate::FIELDS`], no matter how plausible
    /// - [`ValidationError::InvalidFormat`] when the value cannot be
    ///   parsed as the field's type
    /// - the scalar validators' errors (negative stock, empty title, ...)
    ///
    /// ## Example
    /// ```rust
    /// use reel_core::validation::MovieUpdate;
    ///
    /// let update = MovieUpdate::parse("availability", "false").unwrap();
    /// assert_eq!(update, MovieUpdate::Availability(false));
    ///
    /// assert!(MovieUpdate::parse("id", "m-2").is_err());
    /// assert!(MovieUpdate::parse("password_hash", "x").is_err());
    /// ```
    pub fn parse(field_name: &str, value: &str) -> ValidationResult<Self> {
        match field_name {
            "title" => {
                validate_title(value)?;
                Ok(MovieUpdate::Title(value.trim().to_string()))
            }
            "stock" => {
                let stock = parse_i64("stock", value)?;
                validate_stock(stock)?;
                Ok(MovieUpdate::Stock(stock))
            }
            "rental_price" => {
                let cents = parse_i64("rental_price", value)?;
                validate_price_cents("rental_price", cents)?;
                Ok(MovieUpdate::RentalPriceCents(cents))
            }
            "sale_price" => {
                let cents = parse_i64("sale_price", value)?;
                validate_price_cents("sale_price", cents)?;
                Ok(MovieUpdate::SalePriceCents(cents))
            }
            "availability" => Ok(MovieUpdate::Availability(parse_bool("availability", value)?)),
            "images" => {
                let images: Vec<String> =
                    serde_json::from_str(value).map_err(|_| ValidationError::InvalidFormat {
                        field: "images".to_string(),
                        reason: "must be a JSON array of strings".to_string(),
                    })?;
                Ok(MovieUpdate::Images(images))
            }
            other => Err(ValidationError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    /// The attribute name this update targets.
    pub const fn field_name(&self) -> &'static str {
        match self {
            MovieUpdate::Title(_) => "title",
            MovieUpdate::Stock(_) => "stock",
            MovieUpdate::RentalPriceCents(_) => "rental_price",
            MovieUpdate::SalePriceCents(_) => "sale_price",
            MovieUpdate::Availability(_) => "availability",
            MovieUpdate::Images(_) => "images",
        }
    }
}

// =============================================================================
// Scalar Parsers
// =============================================================================

fn parse_i64(field: &str, value: &str) -> ValidationResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be an integer".to_string(),
        })
}

fn parse_bool(field: &str, value: &str) -> ValidationResult<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be 'true' or 'false'".to_string(),
        }),
    }
}

// =============================================================================
// Scalar Validators
// =============================================================================

/// Validates a movie title.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a stock count.
///
/// ## Rules
/// - Must be non-negative (zero means out of stock, which is legal:
///   availability is an independent flag)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: promotional free rentals)
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a username.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address shape.
///
/// ## Rules
/// Minimal structural check (`local@domain`); deliverability is not a
/// domain concern here.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like local@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a listing page size.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed [`MAX_LIST_LIMIT`]
pub fn validate_limit(limit: i64) -> ValidationResult<()> {
    if limit <= 0 || limit > MAX_LIST_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_LIST_LIMIT,
        });
    }

    Ok(())
}

/// Validates a listing offset.
pub fn validate_offset(offset: i64) -> ValidationResult<()> {
    if offset < 0 {
        return Err(ValidationError::Negative {
            field: "offset".to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use reel_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        assert_eq!(
            MovieUpdate::parse("title", "Blade Runner").unwrap(),
            MovieUpdate::Title("Blade Runner".to_string())
        );
        assert_eq!(
            MovieUpdate::parse("stock", "7").unwrap(),
            MovieUpdate::Stock(7)
        );
        assert_eq!(
            MovieUpdate::parse("rental_price", "499").unwrap(),
            MovieUpdate::RentalPriceCents(499)
        );
        assert_eq!(
            MovieUpdate::parse("sale_price", "1999").unwrap(),
            MovieUpdate::SalePriceCents(1999)
        );
        assert_eq!(
            MovieUpdate::parse("availability", "false").unwrap(),
            MovieUpdate::Availability(false)
        );
        assert_eq!(
            MovieUpdate::parse("images", r#"["a.jpg","b.jpg"]"#).unwrap(),
            MovieUpdate::Images(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
    }

    #[test]
    fn test_parse_rejects_every_unknown_field() {
        // Names that exist on the entity but are not updatable, names
        // that exist on other entities, and outright hostile names all
        // get the same rejection.
        for field in [
            "id",
            "created_at",
            "updated_at",
            "role",
            "password_hash",
            "movies.title",
            "title; DROP TABLE movies",
            "",
        ] {
            let err = MovieUpdate::parse(field, "x").unwrap_err();
            assert!(
                matches!(err, ValidationError::UnknownField { .. }),
                "expected UnknownField for {field:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(MovieUpdate::parse("stock", "many").is_err());
        assert!(MovieUpdate::parse("stock", "-1").is_err());
        assert!(MovieUpdate::parse("rental_price", "-100").is_err());
        assert!(MovieUpdate::parse("availability", "yes").is_err());
        assert!(MovieUpdate::parse("images", "not json").is_err());
        assert!(MovieUpdate::parse("title", "   ").is_err());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in MovieUpdate::FIELDS {
            let value = match *field {
                "title" => "T",
                "availability" => "true",
                "images" => "[]",
                _ => "1",
            };
            let update = MovieUpdate::parse(field, value).unwrap();
            assert_eq!(update.field_name(), *field);
        }
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Alien").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("kathryn-b").is_ok());
        assert!(validate_username("user_1").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("nodomain@").is_err());
        assert!(validate_email("@nolocal.com").is_err());
        assert!(validate_email("no-at-sign").is_err());
    }

    #[test]
    fn test_validate_paging() {
        assert!(validate_limit(10).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(MAX_LIST_LIMIT + 1).is_err());
        assert!(validate_offset(0).is_ok());
        assert!(validate_offset(-1).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }
}

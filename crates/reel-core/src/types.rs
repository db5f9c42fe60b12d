//! # Domain Types
//!
//! Core domain types used throughout Reel.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Movie       │   │     Order       │   │  Interaction    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  title          │   │  movie_id (FK)  │   │  movie_id (FK)  │       │
//! │  │  stock          │   │  user_id (FK)   │   │  user_id (FK)   │       │
//! │  │  rental/sale ¢  │   │  order_type     │   │  type           │       │
//! │  │  availability   │   │  price_paid ¢   │   │  timestamp      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Principal     │   │     Role        │   │   OrderType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, username   │   │  Customer       │   │  Rental         │       │
//! │  │  email, role    │   │  Admin          │   │  Purchase       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Untrusted Input
//! `Role`, `OrderType` and `InteractionType` arrive as strings from the
//! outside world. They are parsed into these closed enums at the boundary
//! (`FromStr`); an unrecognized value is a validation error before any
//! entity is looked up.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Role & Principal
// =============================================================================

/// The privilege level of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer: may order, return, and record interactions.
    Customer,
    /// Administrator: full catalog and account management.
    Admin,
}

impl Role {
    /// Stable string form, matching the database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    /// Whether this role satisfies a requirement.
    ///
    /// Only `Admin` meets an admin requirement; any authenticated role
    /// meets a customer requirement.
    #[inline]
    pub const fn meets(&self, required: Role) -> bool {
        match required {
            Role::Customer => true,
            Role::Admin => matches!(self, Role::Admin),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::UnknownVariant {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated actor making a request.
///
/// Created by the session-auth collaborator; immutable for the duration
/// of a request. The core never sees credentials, only this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Privilege level.
    pub role: Role,
}

// =============================================================================
// Movie
// =============================================================================

/// An inventory item available for rental or purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Count of physical copies on hand (non-negative).
    pub stock: i64,

    /// Rental price in cents.
    pub rental_price_cents: i64,

    /// Sale price in cents.
    pub sale_price_cents: i64,

    /// Whether the movie is offered at all.
    ///
    /// Independent of stock: an item can be marked unavailable with
    /// copies remaining. Soft-disable sets this to false.
    pub availability: bool,

    /// Ordered cover/still image URLs.
    pub images: Vec<String>,

    /// When the movie was created.
    pub created_at: DateTime<Utc>,

    /// When the movie was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    /// Returns the rental price as a Money type.
    #[inline]
    pub fn rental_price(&self) -> Money {
        Money::from_cents(self.rental_price_cents)
    }

    /// Returns the sale price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }
}

// =============================================================================
// Catalog Listing Filters
// =============================================================================

/// Sortable movie columns.
///
/// A closed enum, not a free-form column name: each variant maps to a
/// fixed SQL identifier, so caller-supplied sort input can never reach
/// a query as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSort {
    Title,
    Stock,
    RentalPrice,
    SalePrice,
    Availability,
}

impl MovieSort {
    /// The column this sort key maps to.
    pub const fn column(&self) -> &'static str {
        match self {
            MovieSort::Title => "title",
            MovieSort::Stock => "stock",
            MovieSort::RentalPrice => "rental_price_cents",
            MovieSort::SalePrice => "sale_price_cents",
            MovieSort::Availability => "availability",
        }
    }
}

impl FromStr for MovieSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(MovieSort::Title),
            "stock" => Ok(MovieSort::Stock),
            "rental_price" => Ok(MovieSort::RentalPrice),
            "sale_price" => Ok(MovieSort::SalePrice),
            "availability" => Ok(MovieSort::Availability),
            other => Err(ValidationError::UnknownVariant {
                kind: "sort field",
                value: other.to_string(),
            }),
        }
    }
}

/// Sort direction for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The SQL keyword this direction maps to.
    pub const fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ValidationError::UnknownVariant {
                kind: "sort direction",
                value: other.to_string(),
            }),
        }
    }
}

/// Catalog listing filters.
///
/// The `availability` filter is a request, not a guarantee: for
/// non-admin principals the catalog forces it to `Some(true)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieFilter {
    pub sort: MovieSort,
    pub direction: SortDirection,
    pub limit: i64,
    pub offset: i64,
    /// Case-insensitive title substring.
    pub title: Option<String>,
    pub availability: Option<bool>,
}

impl Default for MovieFilter {
    fn default() -> Self {
        MovieFilter {
            sort: MovieSort::Title,
            direction: SortDirection::Asc,
            limit: 10,
            offset: 0,
            title: None,
            availability: None,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Whether an order sells or rents a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Temporary possession; carries a due date and a return path.
    Rental,
    /// Permanent transfer; no return path.
    Purchase,
}

impl OrderType {
    /// Stable string form, matching the database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderType::Rental => "rental",
            OrderType::Purchase => "purchase",
        }
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rental" => Ok(OrderType::Rental),
            "purchase" => Ok(OrderType::Purchase),
            other => Err(ValidationError::UnknownVariant {
                kind: "order type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction linking a principal to a movie.
///
/// ## Lifecycle
/// Exactly two lifecycle points: creation and (rentals only) return.
/// `price_paid_cents` and `expected_return_date` are set once, at
/// creation, and never recomputed. `delay_penalty_paid_cents` is set at
/// most once, at the return event, and only when the return is late.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Movie this order sells or rents.
    pub movie_id: String,

    /// User who placed the order.
    pub user_id: String,

    /// Rental or purchase.
    pub order_type: OrderType,

    /// When the order was placed (UTC, stamped at creation).
    pub order_datetime: DateTime<Utc>,

    /// Price charged at creation, frozen.
    pub price_paid_cents: i64,

    /// Due date for rentals; None for purchases.
    pub expected_return_date: Option<NaiveDate>,

    /// Actual return date; None until returned.
    pub returned_date: Option<NaiveDate>,

    /// Late-return surcharge; zero until (and unless) a late return.
    pub delay_penalty_paid_cents: i64,
}

impl Order {
    /// Returns the price paid as Money.
    #[inline]
    pub fn price_paid(&self) -> Money {
        Money::from_cents(self.price_paid_cents)
    }

    /// Returns the penalty paid as Money.
    #[inline]
    pub fn delay_penalty_paid(&self) -> Money {
        Money::from_cents(self.delay_penalty_paid_cents)
    }
}

// =============================================================================
// Interaction
// =============================================================================

/// Kinds of lightweight user-to-movie events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Like,
    View,
    Review,
}

impl InteractionType {
    /// Stable string form, matching the database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Like => "like",
            InteractionType::View => "view",
            InteractionType::Review => "review",
        }
    }
}

impl FromStr for InteractionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(InteractionType::Like),
            "view" => Ok(InteractionType::View),
            "review" => Ok(InteractionType::Review),
            other => Err(ValidationError::UnknownVariant {
                kind: "interaction type",
                value: other.to_string(),
            }),
        }
    }
}

/// An append-only user-to-movie event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Interaction {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    pub interaction_type: InteractionType,
    /// When the event happened (UTC, stamped at creation).
    pub interaction_datetime: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_meets() {
        assert!(Role::Admin.meets(Role::Admin));
        assert!(Role::Admin.meets(Role::Customer));
        assert!(Role::Customer.meets(Role::Customer));
        assert!(!Role::Customer.meets(Role::Admin));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("customer".parse::<Role>().unwrap(), Role::Customer);
        assert!("superuser".parse::<Role>().is_err());
        // Case-sensitive on purpose: the wire format is lowercase
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!("rental".parse::<OrderType>().unwrap(), OrderType::Rental);
        assert_eq!("purchase".parse::<OrderType>().unwrap(), OrderType::Purchase);
        assert!("lease".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_interaction_type_parse() {
        assert_eq!("like".parse::<InteractionType>().unwrap(), InteractionType::Like);
        assert!("dislike".parse::<InteractionType>().is_err());
    }

    #[test]
    fn test_sort_maps_to_fixed_columns() {
        assert_eq!(MovieSort::RentalPrice.column(), "rental_price_cents");
        assert_eq!(SortDirection::Desc.keyword(), "DESC");
        assert!("rowid".parse::<MovieSort>().is_err());
        assert!("; DROP TABLE movies;".parse::<MovieSort>().is_err());
    }

    #[test]
    fn test_filter_defaults() {
        let filter = MovieFilter::default();
        assert_eq!(filter.sort, MovieSort::Title);
        assert_eq!(filter.direction, SortDirection::Asc);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
        assert!(filter.availability.is_none());
    }
}

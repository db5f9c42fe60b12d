//! # reel-core: Pure Business Logic for Reel
//!
//! This crate is the **heart** of the Reel storefront. It contains all
//! decision logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Reel Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  reel-api (Service Layer)                       │   │
//! │  │   MovieCatalog ── OrderLedger ── InteractionLog ── Accounts    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ reel-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │   authz   │  │   │
//! │  │   │   Movie   │  │   Money   │  │ due dates │  │ role gate │  │   │
//! │  │   │   Order   │  │ PenaltyRt │  │ penalties │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    reel-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Movie, Order, Principal, Interaction)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Order pricing, rental due dates, delay penalties
//! - [`authz`] - Role-based authorization gate
//! - [`validation`] - Field-update whitelisting and input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Closed Enums**: Untrusted strings (roles, order types, field names) are
//!    parsed into closed variant types at the boundary - never used dynamically

// =============================================================================
// Module Declarations
// =============================================================================

pub mod authz;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use reel_core::Money` instead of
// `use reel_core::money::Money`

pub use authz::{authorize, is_admin, AuthError};
pub use error::{CoreError, ValidationError};
pub use money::{Money, PenaltyRate};
pub use pricing::{delay_penalty, price_order, OrderPricing, RentalTerms};
pub use types::*;
pub use validation::MovieUpdate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default rental window in days (order date → due date).
///
/// ## Why a constant?
/// The window is fixed per deployment, not per order. The service layer
/// reads `RETURN_WINDOW_DAYS` from the environment and falls back to this.
pub const DEFAULT_RETURN_WINDOW_DAYS: i64 = 14;

/// Default delay penalty rate in basis points per late day.
///
/// 1000 bps = 10% of the price paid, per day overdue.
pub const DEFAULT_PENALTY_RATE_BPS: u32 = 1000;

/// Maximum page size for catalog listings.
pub const MAX_LIST_LIMIT: i64 = 100;

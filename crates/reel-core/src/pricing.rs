//! # Order Pricing
//!
//! Price and due-date derivation at order creation, and the delay
//! penalty computed at the return event. This is the decision core of
//! the whole system.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE (rental)                                                    │
//! │     └── price_order() → price = movie.rental_price                     │
//! │                         due   = order date + RETURN_WINDOW_DAYS        │
//! │                                                                         │
//! │  1. CREATE (purchase)                                                  │
//! │     └── price_order() → price = movie.sale_price, no due date          │
//! │                                                                         │
//! │  2. RETURN (rentals only)                                              │
//! │     └── delay_penalty() → zero if returned on or before the due date   │
//! │                           else price × rate × days late, rounded       │
//! │                                                                         │
//! │  Prices and due dates are derived EXACTLY ONCE, at creation.           │
//! │  Nothing here is ever recomputed from later catalog state.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, PenaltyRate};
use crate::types::{Movie, OrderType};
use crate::{DEFAULT_PENALTY_RATE_BPS, DEFAULT_RETURN_WINDOW_DAYS};

// =============================================================================
// Rental Terms
// =============================================================================

/// Deployment-wide rental policy constants.
///
/// Loaded from configuration by the service layer; defaults are used
/// for tests and development.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentalTerms {
    /// Days from rental creation to the due date.
    pub return_window_days: i64,

    /// Fraction of the price paid charged per late day, in basis points.
    pub penalty_rate: PenaltyRate,
}

impl Default for RentalTerms {
    fn default() -> Self {
        RentalTerms {
            return_window_days: DEFAULT_RETURN_WINDOW_DAYS,
            penalty_rate: PenaltyRate::from_bps(DEFAULT_PENALTY_RATE_BPS),
        }
    }
}

// =============================================================================
// Creation-Time Pricing
// =============================================================================

/// The creation-time outcome: what the order costs and when it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPricing {
    /// Price charged for this order, frozen at creation.
    pub price: Money,

    /// Due date for rentals; `None` for purchases.
    pub expected_return_date: Option<NaiveDate>,
}

/// Derives the price and due date for a new order.
///
/// ## Rules
/// - `Rental`: price is the movie's rental price; the due date is the
///   order timestamp's date plus the return window.
/// - `Purchase`: price is the movie's sale price; no due date exists.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use reel_core::pricing::{price_order, RentalTerms};
/// use reel_core::types::{Movie, OrderType};
///
/// # let movie = Movie {
/// #     id: "m-1".into(), title: "Alien".into(), stock: 3,
/// #     rental_price_cents: 399, sale_price_cents: 1499,
/// #     availability: true, images: vec![],
/// #     created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// let ordered_at = Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap();
/// let terms = RentalTerms::default(); // 14-day window
///
/// let pricing = price_order(&movie, OrderType::Rental, ordered_at, terms);
/// assert_eq!(pricing.price.cents(), 399);
/// assert_eq!(
///     pricing.expected_return_date.unwrap().to_string(),
///     "2024-03-15"
/// );
/// ```
pub fn price_order(
    movie: &Movie,
    order_type: OrderType,
    ordered_at: DateTime<Utc>,
    terms: RentalTerms,
) -> OrderPricing {
    match order_type {
        OrderType::Rental => OrderPricing {
            price: movie.rental_price(),
            expected_return_date: Some(
                ordered_at.date_naive() + Duration::days(terms.return_window_days),
            ),
        },
        OrderType::Purchase => OrderPricing {
            price: movie.sale_price(),
            expected_return_date: None,
        },
    }
}

// =============================================================================
// Return-Time Penalty
// =============================================================================

/// Computes the monetary penalty for a (possibly late) return.
///
/// ## Edge Policy
/// Strict `>` comparison: a return exactly on the due date incurs no
/// penalty. Early returns earn no credit either.
///
/// ## Rounding
/// Half-up at the cent boundary (see [`Money::delay_surcharge`]).
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use reel_core::money::{Money, PenaltyRate};
/// use reel_core::pricing::delay_penalty;
///
/// let due = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let rate = PenaltyRate::from_bps(1000); // 10% per day
/// let price = Money::from_cents(1000);    // $10.00
///
/// // On the due date: no penalty
/// assert!(delay_penalty(price, rate, due, due).is_zero());
///
/// // Three days late: $3.00
/// let late = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
/// assert_eq!(delay_penalty(price, rate, due, late).cents(), 300);
/// ```
pub fn delay_penalty(
    price_paid: Money,
    rate: PenaltyRate,
    expected_return_date: NaiveDate,
    returned_date: NaiveDate,
) -> Money {
    if returned_date > expected_return_date {
        let delayed_days = (returned_date - expected_return_date).num_days();
        price_paid.delay_surcharge(rate, delayed_days)
    } else {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

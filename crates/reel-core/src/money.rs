//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `PenaltyRate` type for the per-day late-return surcharge.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Rental price $3.99 = 399 cents (i64)                                 │
//! │    Penalty math happens in i128, rounds once, back to cents             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use reel_core::money::{Money, PenaltyRate};
//!
//! let price = Money::from_cents(1000); // $10.00
//! let rate = PenaltyRate::from_bps(1000); // 10% per day
//!
//! // 3 days late on a $10.00 rental at 10%/day = $3.00
//! assert_eq!(price.delay_surcharge(rate, 3).cents(), 300);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: room for arithmetic, even though prices are non-negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use reel_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Computes the late-return surcharge for a number of overdue days.
    ///
    /// ## Formula
    /// `price × rate × days`, where rate is in basis points:
    /// `(cents × bps × days + 5000) / 10000` — half-up rounding at the
    /// two-decimal (cent) boundary, computed in i128 to prevent overflow.
    ///
    /// ## Rounding Policy
    /// Half-up (0.5 cents rounds away from zero). Prices and rates are
    /// non-negative here, so this matches round-half-away-from-zero.
    ///
    /// ## Example
    /// ```rust
    /// use reel_core::money::{Money, PenaltyRate};
    ///
    /// let price = Money::from_cents(1000);     // $10.00
    /// let rate = PenaltyRate::from_bps(1000);  // 10% per day
    /// assert_eq!(price.delay_surcharge(rate, 3).cents(), 300); // $3.00
    /// ```
    pub fn delay_surcharge(&self, rate: PenaltyRate, delayed_days: i64) -> Money {
        if delayed_days <= 0 {
            return Money::zero();
        }
        // i128 intermediate: cents × bps × days can exceed i64 range
        let raw = self.0 as i128 * rate.bps() as i128 * delayed_days as i128;
        let cents = (raw + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Penalty Rate
// =============================================================================

/// Per-day delay penalty rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% of the price paid, charged per day overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRate(u32);

impl PenaltyRate {
    /// Creates a penalty rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        PenaltyRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10000.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging, not for localized UI display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

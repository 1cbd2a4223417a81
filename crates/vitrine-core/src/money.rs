//! # Money Module
//!
//! Provides the `Money` type for monetary values.
//!
//! ## Floating Point, Rounded Only At The Edge
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  unit price ──► discount ──► composer ──► tax ──► report / quote        │
//! │     f64           f64          f64        f64         │                 │
//! │                                                       ▼                 │
//! │                                         Display / rounded(decimals)     │
//! │                                                                         │
//! │  Every intermediate value keeps full f64 precision. Only the            │
//! │  presentation boundary (Display, `rounded`, config formatting)          │
//! │  rounds, so two equivalent rule formulations agree within epsilon.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::money::Money;
//!
//! let unit = Money::new(50_000.0);
//! let total = unit * 6_i64;
//! assert_eq!(total.amount(), 300_000.0);
//! assert_eq!(format!("{}", Money::new(4.9995)), "5.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Tolerance used when comparing amounts produced by different formulas.
pub const MONEY_EPSILON: f64 = 1e-9;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the catalog currency.
///
/// ## Design Decisions
/// - **f64**: the catalog imposes no fixed-point requirement
/// - **Transparent serde**: serializes as a bare number
/// - **No currency**: conversion is out of scope, the catalog has one currency
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Wraps a raw amount.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Clamps the amount at zero from below.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// assert_eq!(Money::new(-12.5).non_negative(), Money::zero());
    /// assert_eq!(Money::new(12.5).non_negative(), Money::new(12.5));
    /// ```
    #[inline]
    pub fn non_negative(self) -> Self {
        if self.0 > 0.0 {
            self
        } else {
            Money::zero()
        }
    }

    /// Returns the smaller of two amounts (the first one on ties).
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    /// Returns the larger of two amounts (the first one on ties).
    #[inline]
    pub fn max(self, other: Money) -> Money {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }

    /// Multiplies by a percentage expressed as 0-100.
    #[inline]
    pub fn percent(self, percent: f64) -> Money {
        Money(self.0 * percent / 100.0)
    }

    /// Compares two amounts within `epsilon`, scaled for large totals.
    pub fn approx_eq(self, other: Money, epsilon: f64) -> bool {
        let scale = self.0.abs().max(other.0.abs()).max(1.0);
        (self.0 - other.0).abs() <= epsilon * scale
    }

    /// Rounds half away from zero to `decimals` places.
    ///
    /// Presentation only. Never feed the result back into a calculation.
    pub fn rounded(&self, decimals: u8) -> f64 {
        let factor = 10_f64.powi(i32::from(decimals));
        (self.0 * factor).round() / factor
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two decimal places, for logs and debugging.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded(2))
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money(amount)
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

/// Multiplication by a scalar (rates, factors).
impl Mul<f64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Money(self.0 * factor)
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty as f64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

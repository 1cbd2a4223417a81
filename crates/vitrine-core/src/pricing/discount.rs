//! # Discount Policies
//!
//! A discount policy maps `(item, quantity)` to the discounted total for
//! that quantity. Policies never mutate the item.
//!
//! ## Two Ways to Write a Discount
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Direct                         Promotion (template hook)               │
//! │  impl DiscountPolicy            impl Promotion                          │
//! │  apply() returns the total      discount_amount() returns the saving   │
//! │                                          │                              │
//! │                                          ▼ blanket impl                 │
//! │                                 apply = max(0, price×qty − saving)      │
//! │                                         0 when qty ≤ 0                  │
//! │                                                                         │
//! │  PercentageOff  ◄── same totals ──►  PercentagePromotion               │
//! │  FixedOff                            FixedPromotion                     │
//! │  BogoHalf       ◄── same totals ──►  BogoHalfPromotion                 │
//! │                                      Buy3Pay2                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::item::Item;
use crate::money::Money;
use crate::types::DiscountFamily;
use crate::MAX_PERCENT_OFF;

// =============================================================================
// Traits
// =============================================================================

/// A discount rule.
pub trait DiscountPolicy: Send + Sync + fmt::Debug {
    /// Display name, e.g. `"Percent-10%"`.
    fn name(&self) -> String;

    fn family(&self) -> DiscountFamily;

    /// Discounted total for `qty` units. Never negative.
    fn apply(&self, item: &Item, qty: i64) -> Money;

    fn applicable_to(&self, _item: &Item) -> bool {
        true
    }
}

/// Discount defined by how much it takes off.
///
/// Every `Promotion` is a [`DiscountPolicy`] through a blanket impl that
/// subtracts [`Promotion::discount_amount`] from `price × qty`, floors the
/// result at zero, and yields zero for non-positive quantities.
pub trait Promotion: Send + Sync + fmt::Debug {
    fn promotion_name(&self) -> String;

    fn promotion_family(&self) -> DiscountFamily;

    /// Saving on `qty` units. Only called with `qty > 0`.
    fn discount_amount(&self, item: &Item, qty: i64) -> Money;

    fn eligible(&self, _item: &Item) -> bool {
        true
    }
}

impl<T: Promotion> DiscountPolicy for T {
    fn name(&self) -> String {
        self.promotion_name()
    }

    fn family(&self) -> DiscountFamily {
        self.promotion_family()
    }

    fn apply(&self, item: &Item, qty: i64) -> Money {
        if qty <= 0 {
            return Money::zero();
        }
        let base = item.price() * qty;
        (base - self.discount_amount(item, qty)).non_negative()
    }

    fn applicable_to(&self, item: &Item) -> bool {
        self.eligible(item)
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, MAX_PERCENT_OFF)
    }
}

fn clamp_amount(amount: f64) -> f64 {
    if amount.is_nan() {
        0.0
    } else {
        amount.max(0.0)
    }
}

// =============================================================================
// Direct Policies
// =============================================================================

/// Percentage off the unit price, clamped to 0-90.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentageOff {
    percent: f64,
}

impl PercentageOff {
    pub fn new(percent: f64) -> Self {
        PercentageOff {
            percent: clamp_percent(percent),
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

impl DiscountPolicy for PercentageOff {
    fn name(&self) -> String {
        format!("Percent-{}%", self.percent)
    }

    fn family(&self) -> DiscountFamily {
        DiscountFamily::Percentage
    }

    fn apply(&self, item: &Item, qty: i64) -> Money {
        let unit = item.price() * (1.0 - self.percent / 100.0);
        unit * qty.max(0)
    }
}

/// Fixed amount off each unit, never below a zero unit price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOff {
    amount: f64,
    digital_only: bool,
}

impl FixedOff {
    pub fn new(amount: f64) -> Self {
        FixedOff {
            amount: clamp_amount(amount),
            digital_only: false,
        }
    }

    /// Variant that only applies to digital items.
    pub fn digital_only(amount: f64) -> Self {
        FixedOff {
            digital_only: true,
            ..FixedOff::new(amount)
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl DiscountPolicy for FixedOff {
    fn name(&self) -> String {
        format!("Fixed-{}", self.amount)
    }

    fn family(&self) -> DiscountFamily {
        DiscountFamily::Fixed
    }

    fn apply(&self, item: &Item, qty: i64) -> Money {
        let unit = (item.price() - Money::new(self.amount)).non_negative();
        unit * qty.max(0)
    }

    fn applicable_to(&self, item: &Item) -> bool {
        !self.digital_only || item.is_digital()
    }
}

/// Buy two, second at half price. Pairs cost 1.5 units, a leftover unit
/// costs full price.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BogoHalf;

impl DiscountPolicy for BogoHalf {
    fn name(&self) -> String {
        "BOGO-HALF".to_string()
    }

    fn family(&self) -> DiscountFamily {
        DiscountFamily::Bundle
    }

    fn apply(&self, item: &Item, qty: i64) -> Money {
        let qty = qty.max(0);
        let pairs = qty / 2;
        let singles = qty % 2;
        item.price() * 1.5 * pairs + item.price() * singles
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// Percentage promotion. Totals match [`PercentageOff`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentagePromotion {
    percent: f64,
}

impl PercentagePromotion {
    pub fn new(percent: f64) -> Self {
        PercentagePromotion {
            percent: clamp_percent(percent),
        }
    }
}

impl Promotion for PercentagePromotion {
    fn promotion_name(&self) -> String {
        format!("Percent-{}%", self.percent)
    }

    fn promotion_family(&self) -> DiscountFamily {
        DiscountFamily::Percentage
    }

    fn discount_amount(&self, item: &Item, qty: i64) -> Money {
        (item.price() * qty).percent(self.percent)
    }
}

/// Fixed amount per unit. The saving never exceeds `price × qty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPromotion {
    amount: f64,
}

impl FixedPromotion {
    pub fn new(amount: f64) -> Self {
        FixedPromotion {
            amount: clamp_amount(amount),
        }
    }
}

impl Promotion for FixedPromotion {
    fn promotion_name(&self) -> String {
        format!("Fixed-{}", self.amount)
    }

    fn promotion_family(&self) -> DiscountFamily {
        DiscountFamily::Fixed
    }

    fn discount_amount(&self, item: &Item, qty: i64) -> Money {
        (Money::new(self.amount) * qty).min(item.price() * qty)
    }
}

/// Half the price of every second unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BogoHalfPromotion;

impl Promotion for BogoHalfPromotion {
    fn promotion_name(&self) -> String {
        "BOGO-HALF".to_string()
    }

    fn promotion_family(&self) -> DiscountFamily {
        DiscountFamily::Bundle
    }

    fn discount_amount(&self, item: &Item, qty: i64) -> Money {
        item.price() * 0.5 * (qty / 2)
    }
}

/// Every third unit is free.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Buy3Pay2;

impl Promotion for Buy3Pay2 {
    fn promotion_name(&self) -> String {
        "Buy 3 Pay 2".to_string()
    }

    fn promotion_family(&self) -> DiscountFamily {
        DiscountFamily::Bundle
    }

    fn discount_amount(&self, item: &Item, qty: i64) -> Money {
        item.price() * (qty / 3)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Cheapest total among the policies that apply to `item`, with the policy
/// that produced it. `None` when no policy applies.
///
/// Ties keep the earliest policy in the slice.
pub fn best_of<'a>(
    item: &Item,
    qty: i64,
    policies: &[&'a dyn DiscountPolicy],
) -> Option<(&'a dyn DiscountPolicy, Money)> {
    policies
        .iter()
        .filter(|policy| policy.applicable_to(item))
        .map(|policy| (*policy, policy.apply(item, qty)))
        .fold(None, |best: Option<(&'a dyn DiscountPolicy, Money)>, candidate| match best {
            Some(current) if current.1.partial_cmp(&candidate.1) != Some(Ordering::Greater) => {
                Some(current)
            }
            _ => Some(candidate),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

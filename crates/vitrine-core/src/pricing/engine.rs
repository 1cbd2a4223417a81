//! # Final Price Engine
//!
//! The `final_price` family on [`Item`] and the per-kind [`PriceComposer`].
//!
//! ## Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ final_price()                     unit price                            │
//! │ final_price_for(qty)              qty ≤ 0 → 0, else price × qty         │
//! │                                                                         │
//! │ final_price_with(qty, policy)     qty ≤ 0 → 0                           │
//! │   ├─ no policy / not applicable / refused by kind → price × qty         │
//! │   ├─ otherwise                                     → policy.apply()     │
//! │   └─ kind.compose_final_price(result, qty)                              │
//! │                                                                         │
//! │ final_price_best(qty, policies)   qty ≤ 0 → 0                           │
//! │   ├─ empty list → final_price_with(qty, None)                           │
//! │   └─ min over final_price_with(qty, Some(p))                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Composition runs after the discount is resolved and is the same for every
//! path that resolves one, fallbacks included. A composer can only add a
//! quantity-independent amount or refuse a policy, so a discount never makes
//! the final price larger than the undiscounted one.

use crate::item::{Item, ItemKind, Shippable};
use crate::money::Money;
use crate::pricing::discount::{best_of, DiscountPolicy};
use crate::types::ShippingSurcharge;

// =============================================================================
// Price Composer
// =============================================================================

/// Per-kind refinement of the final price.
pub trait PriceComposer {
    /// Final total given the resolved discount result for `qty` units.
    fn compose_final_price(&self, discounted: Money, qty: i64) -> Money;

    /// Whether this kind accepts `policy` at all. A refused policy is
    /// treated like an inapplicable one.
    fn admits(&self, _policy: &dyn DiscountPolicy) -> bool {
        true
    }
}

impl PriceComposer for ItemKind {
    fn compose_final_price(&self, discounted: Money, _qty: i64) -> Money {
        match self {
            ItemKind::Physical(attrs) if attrs.surcharge() == ShippingSurcharge::Included => {
                discounted + attrs.estimate_shipping()
            }
            _ => discounted,
        }
    }

    fn admits(&self, policy: &dyn DiscountPolicy) -> bool {
        match self {
            ItemKind::Digital(attrs) => !attrs.ignores(policy.family()),
            _ => true,
        }
    }
}

// =============================================================================
// Final Price Family
// =============================================================================

impl Item {
    /// Unit price, quantity 1, no rules.
    pub fn final_price(&self) -> Money {
        self.price()
    }

    /// `price × qty`, or zero for `qty ≤ 0`.
    pub fn final_price_for(&self, qty: i64) -> Money {
        if qty <= 0 {
            return Money::zero();
        }
        self.price() * qty
    }

    /// Final price under an optional discount.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::ids::SequentialIds;
    /// use vitrine_core::pricing::discount::{FixedOff, PercentageOff};
    /// use vitrine_core::{Item, Money};
    ///
    /// let ids = SequentialIds::default();
    /// let mug = Item::generic("G-1", "Mug", 100.0, &ids);
    ///
    /// assert_eq!(mug.final_price_with(2, Some(&PercentageOff::new(50.0))), Money::new(100.0));
    /// // digital-only rule on a generic item falls back to the base price
    /// assert_eq!(mug.final_price_with(2, Some(&FixedOff::digital_only(10.0))), Money::new(200.0));
    /// assert_eq!(mug.final_price_with(-1, None), Money::zero());
    /// ```
    pub fn final_price_with(&self, qty: i64, policy: Option<&dyn DiscountPolicy>) -> Money {
        if qty <= 0 {
            return Money::zero();
        }
        let discounted = match policy {
            Some(policy) if self.accepts(policy) => policy.apply(self, qty),
            _ => self.final_price_for(qty),
        };
        self.kind().compose_final_price(discounted, qty)
    }

    /// Cheapest final price over `policies`.
    ///
    /// Every policy is evaluated through [`Item::final_price_with`], so one
    /// that does not apply contributes the undiscounted total.
    pub fn final_price_best(&self, qty: i64, policies: &[&dyn DiscountPolicy]) -> Money {
        if qty <= 0 {
            return Money::zero();
        }
        if policies.is_empty() {
            return self.final_price_with(qty, None);
        }
        policies
            .iter()
            .map(|policy| self.final_price_with(qty, Some(*policy)))
            .fold(None, |best: Option<Money>, total| match best {
                Some(current) => Some(current.min(total)),
                None => Some(total),
            })
            .unwrap_or_else(|| self.final_price_with(qty, None))
    }

    /// The policy that gives the lowest final price, with that price.
    ///
    /// `None` when `qty ≤ 0` or no policy is usable for this item.
    pub fn best_discount<'a>(
        &self,
        qty: i64,
        policies: &[&'a dyn DiscountPolicy],
    ) -> Option<(&'a dyn DiscountPolicy, Money)> {
        if qty <= 0 {
            return None;
        }
        let usable: Vec<&'a dyn DiscountPolicy> = policies
            .iter()
            .copied()
            .filter(|policy| self.kind().admits(*policy))
            .collect();
        best_of(self, qty, &usable)
            .map(|(policy, discounted)| (policy, self.kind().compose_final_price(discounted, qty)))
    }

    fn accepts(&self, policy: &dyn DiscountPolicy) -> bool {
        policy.applicable_to(self) && self.kind().admits(policy)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Tax Policies
//!
//! A tax policy maps a pre-tax amount to the tax owed on it.
//!
//! ## Progressive Tiers
//! ```text
//!   amount < 100         →  5%
//!   100 ≤ amount ≤ 500   → 10%
//!   amount > 500         → 15%
//! ```
//!
//! Applicability is advisory: nothing in the pricing path picks a tax policy
//! for an item automatically. Callers that care check
//! [`TaxPolicy::applicable_to`] first.

use std::fmt;

use crate::item::Item;
use crate::money::Money;
use crate::types::TaxRate;

/// A tax rule.
pub trait TaxPolicy: Send + Sync + fmt::Debug {
    /// Human-readable label.
    fn name(&self) -> String;

    /// Nominal rate. Tiered policies report a representative rate.
    fn rate(&self) -> TaxRate;

    /// Tax owed on `amount`.
    fn calculate_tax(&self, amount: Money) -> Money {
        amount * self.rate().fraction()
    }

    fn applicable_to(&self, _item: &Item) -> bool {
        true
    }
}

// =============================================================================
// Policies
// =============================================================================

/// 0%.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTax;

impl TaxPolicy for NoTax {
    fn name(&self) -> String {
        "No tax".to_string()
    }

    fn rate(&self) -> TaxRate {
        TaxRate::zero()
    }
}

/// A single flat VAT rate.
#[derive(Debug, Clone, Copy)]
pub struct FlatVat {
    rate: TaxRate,
}

impl FlatVat {
    pub fn new(rate: TaxRate) -> Self {
        FlatVat { rate }
    }

    pub fn from_percentage(percent: f64) -> Self {
        FlatVat::new(TaxRate::from_percentage(percent))
    }
}

impl TaxPolicy for FlatVat {
    fn name(&self) -> String {
        format!("VAT {}%", self.rate.percentage())
    }

    fn rate(&self) -> TaxRate {
        self.rate
    }
}

/// Three-tier tax that branches on the amount itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressiveTax;

impl ProgressiveTax {
    pub const LOW_THRESHOLD: f64 = 100.0;
    pub const HIGH_THRESHOLD: f64 = 500.0;
    pub const LOW_RATE: f64 = 0.05;
    pub const MID_RATE: f64 = 0.10;
    pub const HIGH_RATE: f64 = 0.15;
}

impl TaxPolicy for ProgressiveTax {
    fn name(&self) -> String {
        "Progressive".to_string()
    }

    /// The middle tier.
    fn rate(&self) -> TaxRate {
        TaxRate::from_fraction(Self::MID_RATE)
    }

    fn calculate_tax(&self, amount: Money) -> Money {
        let value = amount.amount();
        let rate = if value < Self::LOW_THRESHOLD {
            Self::LOW_RATE
        } else if value <= Self::HIGH_THRESHOLD {
            Self::MID_RATE
        } else {
            Self::HIGH_RATE
        };
        amount * rate
    }
}

/// Reduced VAT that only digital items qualify for.
#[derive(Debug, Clone, Copy)]
pub struct ReducedDigitalVat {
    rate: TaxRate,
}

impl ReducedDigitalVat {
    pub fn new(rate: TaxRate) -> Self {
        ReducedDigitalVat { rate }
    }
}

impl Default for ReducedDigitalVat {
    /// 5%.
    fn default() -> Self {
        ReducedDigitalVat::new(TaxRate::from_percentage(5.0))
    }
}

impl TaxPolicy for ReducedDigitalVat {
    fn name(&self) -> String {
        format!("Digital VAT {}%", self.rate.percentage())
    }

    fn rate(&self) -> TaxRate {
        self.rate
    }

    fn applicable_to(&self, item: &Item) -> bool {
        item.is_digital()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    const EPS: f64 = 1e-9;

    fn tax(policy: &dyn TaxPolicy, amount: f64) -> f64 {
        policy.calculate_tax(Money::new(amount)).amount()
    }

    #[test]
    fn test_progressive_tier_boundaries() {
        assert!((tax(&ProgressiveTax, 99.99) - 4.9995).abs() < EPS);
        assert!((tax(&ProgressiveTax, 100.0) - 10.0).abs() < EPS);
        assert!((tax(&ProgressiveTax, 500.0) - 50.0).abs() < EPS);
        assert!((tax(&ProgressiveTax, 500.01) - 75.0015).abs() < EPS);
        assert!((ProgressiveTax.rate().fraction() - 0.10).abs() < EPS);
    }

    #[test]
    fn test_flat_and_no_tax() {
        assert!((tax(&FlatVat::from_percentage(12.0), 405_000.0) - 48_600.0).abs() < 1e-6);
        assert_eq!(tax(&NoTax, 405_000.0), 0.0);
        assert_eq!(FlatVat::from_percentage(20.0).name(), "VAT 20%");
    }

    #[test]
    fn test_reduced_digital_vat_applicability() {
        let ids = SequentialIds::default();
        let ebook = Item::digital("D-1", "E-Book", 1_500.0, 12.5, &ids);
        let laptop = Item::physical("P-1", "Laptop", 450_000.0, 1.8, &ids);
        let mug = Item::generic("G-1", "Mug", 10.0, &ids);

        let vat = ReducedDigitalVat::default();
        assert!(vat.applicable_to(&ebook));
        assert!(!vat.applicable_to(&laptop));
        assert!(!vat.applicable_to(&mug));
        assert!((tax(&vat, 1_500.0) - 75.0).abs() < EPS);

        assert!(FlatVat::from_percentage(12.0).applicable_to(&laptop));
    }
}

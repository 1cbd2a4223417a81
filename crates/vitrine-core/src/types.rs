//! # Domain Types
//!
//! Small value types shared across the pricing core.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  StockStatus    │   │ConstructionMode │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  fraction (f64) │   │  OutOfStock     │   │  Permissive     │       │
//! │  │  0.12 = 12%     │   │  Low (1-10)     │   │  Strict         │       │
//! │  └─────────────────┘   │  InStock        │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ DiscountFamily  │   │ShippingSurcharge│   │ DigitalMarkdown │       │
//! │  │  Percentage     │   │  Separate       │   │  Disabled       │       │
//! │  │  Fixed          │   │  Included       │   │  Legacy         │       │
//! │  │  Bundle         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate stored as a fraction.
///
/// `TaxRate::from_percentage(12.0)` holds `0.12`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a fraction (`0.05` = 5%).
    #[inline]
    pub const fn from_fraction(fraction: f64) -> Self {
        TaxRate(fraction)
    }

    /// Creates a tax rate from a percentage (`5.0` = 5%).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate(pct / 100.0)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0.0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Stock level derived from an item's quantity. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    /// Quantity is zero.
    OutOfStock,
    /// Quantity is between 1 and [`LOW_STOCK_THRESHOLD`].
    Low,
    /// Anything above the low-stock threshold.
    InStock,
}

impl StockStatus {
    /// Classifies a quantity.
    pub fn from_quantity(quantity: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockStatus::OutOfStock => "OUT_OF_STOCK",
            StockStatus::Low => "LOW",
            StockStatus::InStock => "IN_STOCK",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Construction Mode
// =============================================================================

/// How item construction treats invalid input.
///
/// ## Modes
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────────┐
/// │ Permissive   │ invalid id → generated id, invalid name → "Unnamed",   │
/// │              │ out-of-range numbers → 0, construction never fails     │
/// ├──────────────┼────────────────────────────────────────────────────────┤
/// │ Strict       │ any invalid supplied field fails construction with     │
/// │              │ CoreError::InvalidConstruction                         │
/// └──────────────┴────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ConstructionMode {
    #[default]
    Permissive,
    Strict,
}

impl FromStr for ConstructionMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(ConstructionMode::Permissive),
            "strict" => Ok(ConstructionMode::Strict),
            _ => Err(ValidationError::NotAllowed {
                field: "construction_mode".to_string(),
                allowed: vec!["permissive".to_string(), "strict".to_string()],
            }),
        }
    }
}

// =============================================================================
// Pricing Switches
// =============================================================================

/// Broad grouping of discount rules, used by item kinds that refuse some.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountFamily {
    /// Percentage off the unit price.
    Percentage,
    /// Fixed amount off the unit price.
    Fixed,
    /// Quantity bundles (BOGO, buy-3-pay-2).
    Bundle,
}

/// Whether a physical item's final price carries its shipping charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingSurcharge {
    /// Shipping is only reported through the shipping estimate.
    #[default]
    Separate,
    /// One shipping charge is added on top of the discounted total.
    Included,
}

/// Download-size markdown behaviour for digital items.
///
/// `Legacy` reproduces the historical side effect: assigning a download
/// size below [`crate::LEGACY_MARKDOWN_THRESHOLD_MB`] cuts the price by 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DigitalMarkdown {
    #[default]
    Disabled,
    Legacy,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(12.0);
        assert!((rate.fraction() - 0.12).abs() < 1e-12);
        assert!((rate.percentage() - 12.0).abs() < 1e-9);
        assert!(TaxRate::default().is_zero());
    }

    #[test]
    fn test_stock_status_boundaries() {
        assert_eq!(StockStatus::from_quantity(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_quantity(1), StockStatus::Low);
        assert_eq!(StockStatus::from_quantity(10), StockStatus::Low);
        assert_eq!(StockStatus::from_quantity(11), StockStatus::InStock);
        assert_eq!(StockStatus::InStock.to_string(), "IN_STOCK");
    }

    #[test]
    fn test_stock_status_serializes_screaming() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"OUT_OF_STOCK\"");
    }

    #[test]
    fn test_construction_mode_parse() {
        assert_eq!(
            "Strict".parse::<ConstructionMode>().unwrap(),
            ConstructionMode::Strict
        );
        assert_eq!(
            " permissive ".parse::<ConstructionMode>().unwrap(),
            ConstructionMode::Permissive
        );
        assert!("lenient".parse::<ConstructionMode>().is_err());
        assert_eq!(ConstructionMode::default(), ConstructionMode::Permissive);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ShippingSurcharge::default(), ShippingSurcharge::Separate);
        assert_eq!(DigitalMarkdown::default(), DigitalMarkdown::Disabled);
    }
}

//! # Shipping Policies
//!
//! Pure functions of `(weight, length, width, height)` to a charge.
//!
//! ## Billable Weight
//! ```text
//! volumetric = L × W × H / 5000
//! billable   = max(actual, volumetric)
//!
//! standard   = billable × 100
//! express    = billable × 200 + 500
//! free       = 0 if billable ≤ 2 kg, else standard
//! ```

use std::fmt;

use crate::money::Money;

// =============================================================================
// Rates
// =============================================================================

/// Shipping rate constants.
pub mod rates {
    /// cm³ per volumetric kilogram.
    pub const VOLUMETRIC_DIVISOR: f64 = 5000.0;
    pub const STANDARD_RATE_PER_KG: f64 = 100.0;
    pub const EXPRESS_RATE_PER_KG: f64 = 200.0;
    /// Flat express handling fee.
    pub const EXPRESS_FEE: f64 = 500.0;
    /// Inclusive upper bound for free shipping.
    pub const FREE_WEIGHT_THRESHOLD_KG: f64 = 2.0;
}

use rates::*;

/// Density-based weight proxy in kilograms.
pub fn volumetric_weight(length_cm: f64, width_cm: f64, height_cm: f64) -> f64 {
    length_cm * width_cm * height_cm / VOLUMETRIC_DIVISOR
}

/// `max(actual, volumetric)`.
pub fn billable_weight(weight_kg: f64, length_cm: f64, width_cm: f64, height_cm: f64) -> f64 {
    weight_kg.max(volumetric_weight(length_cm, width_cm, height_cm))
}

// =============================================================================
// Policy Trait
// =============================================================================

/// A shipping-cost rule.
pub trait ShippingPolicy: Send + Sync + fmt::Debug {
    /// Registry key style name, e.g. `"standard"`.
    fn name(&self) -> &str;

    /// Charge for one parcel with the given weight and dimensions.
    fn calculate(&self, weight_kg: f64, length_cm: f64, width_cm: f64, height_cm: f64) -> Money;
}

// =============================================================================
// Policies
// =============================================================================

/// Billable weight × 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardShipping;

impl ShippingPolicy for StandardShipping {
    fn name(&self) -> &str {
        "standard"
    }

    fn calculate(&self, weight_kg: f64, length_cm: f64, width_cm: f64, height_cm: f64) -> Money {
        Money::new(billable_weight(weight_kg, length_cm, width_cm, height_cm) * STANDARD_RATE_PER_KG)
    }
}

/// Billable weight × 200 plus a flat 500 fee.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressShipping;

impl ShippingPolicy for ExpressShipping {
    fn name(&self) -> &str {
        "express"
    }

    fn calculate(&self, weight_kg: f64, length_cm: f64, width_cm: f64, height_cm: f64) -> Money {
        let billable = billable_weight(weight_kg, length_cm, width_cm, height_cm);
        Money::new(billable * EXPRESS_RATE_PER_KG + EXPRESS_FEE)
    }
}

/// Free up to 2 kg billable, standard rate above.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeShipping;

impl ShippingPolicy for FreeShipping {
    fn name(&self) -> &str {
        "free"
    }

    fn calculate(&self, weight_kg: f64, length_cm: f64, width_cm: f64, height_cm: f64) -> Money {
        if billable_weight(weight_kg, length_cm, width_cm, height_cm) <= FREE_WEIGHT_THRESHOLD_KG {
            Money::zero()
        } else {
            StandardShipping.calculate(weight_kg, length_cm, width_cm, height_cm)
        }
    }
}

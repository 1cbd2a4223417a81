//! Physical item attributes and the shipping capability.

use std::fmt;
use std::sync::Arc;

use crate::money::Money;
use crate::pricing::shipping::{billable_weight, ShippingPolicy, StandardShipping};
use crate::types::ShippingSurcharge;
use crate::validation::{validate_dimensions, validate_weight_kg};

/// Anything that can be put in a parcel.
pub trait Shippable {
    /// Billable weight in kilograms: `max(actual, volumetric)`.
    fn shipping_weight(&self) -> f64;

    /// Charge computed by the assigned shipping policy.
    fn estimate_shipping(&self) -> Money;
}

/// Weight, package size and shipping rule of a physical item.
#[derive(Clone)]
pub struct PhysicalAttributes {
    weight_kg: f64,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    shipping: Arc<dyn ShippingPolicy>,
    surcharge: ShippingSurcharge,
}

impl PhysicalAttributes {
    /// Zero weight and size, standard shipping, shipping reported separately.
    pub fn new() -> Self {
        PhysicalAttributes {
            weight_kg: 0.0,
            length_cm: 0.0,
            width_cm: 0.0,
            height_cm: 0.0,
            shipping: Arc::new(StandardShipping),
            surcharge: ShippingSurcharge::Separate,
        }
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// `(length, width, height)` in centimetres.
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (self.length_cm, self.width_cm, self.height_cm)
    }

    pub fn shipping_policy(&self) -> &Arc<dyn ShippingPolicy> {
        &self.shipping
    }

    pub fn surcharge(&self) -> ShippingSurcharge {
        self.surcharge
    }

    pub fn try_set_weight_kg(&mut self, weight_kg: f64) -> bool {
        match validate_weight_kg(weight_kg) {
            Ok(weight_kg) => {
                self.weight_kg = weight_kg;
                true
            }
            Err(_) => false,
        }
    }

    /// Sets all three dimensions, or none of them.
    pub fn try_set_dimensions(&mut self, length_cm: f64, width_cm: f64, height_cm: f64) -> bool {
        match validate_dimensions(length_cm, width_cm, height_cm) {
            Ok((length_cm, width_cm, height_cm)) => {
                self.length_cm = length_cm;
                self.width_cm = width_cm;
                self.height_cm = height_cm;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_shipping_policy(&mut self, policy: Arc<dyn ShippingPolicy>) {
        self.shipping = policy;
    }

    pub fn set_surcharge(&mut self, surcharge: ShippingSurcharge) {
        self.surcharge = surcharge;
    }
}

impl Default for PhysicalAttributes {
    fn default() -> Self {
        PhysicalAttributes::new()
    }
}

impl Shippable for PhysicalAttributes {
    fn shipping_weight(&self) -> f64 {
        billable_weight(self.weight_kg, self.length_cm, self.width_cm, self.height_cm)
    }

    fn estimate_shipping(&self) -> Money {
        self.shipping
            .calculate(self.weight_kg, self.length_cm, self.width_cm, self.height_cm)
    }
}

impl fmt::Debug for PhysicalAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalAttributes")
            .field("weight_kg", &self.weight_kg)
            .field("length_cm", &self.length_cm)
            .field("width_cm", &self.width_cm)
            .field("height_cm", &self.height_cm)
            .field("shipping", &self.shipping.name())
            .field("surcharge", &self.surcharge)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::shipping::ExpressShipping;

    #[test]
    fn test_defaults_to_standard_shipping() {
        let attrs = PhysicalAttributes::new();
        assert_eq!(attrs.shipping_policy().name(), "standard");
        assert_eq!(attrs.surcharge(), ShippingSurcharge::Separate);
    }

    #[test]
    fn test_rejected_dimensions_keep_previous() {
        let mut attrs = PhysicalAttributes::new();
        assert!(attrs.try_set_dimensions(35.0, 24.0, 2.0));
        assert!(!attrs.try_set_dimensions(10.0, 10.0, 1000.5));
        assert_eq!(attrs.dimensions(), (35.0, 24.0, 2.0));

        assert!(attrs.try_set_weight_kg(1.8));
        assert!(!attrs.try_set_weight_kg(-0.1));
        assert_eq!(attrs.weight_kg(), 1.8);
    }

    #[test]
    fn test_estimate_uses_assigned_policy() {
        let mut attrs = PhysicalAttributes::new();
        attrs.try_set_weight_kg(1.8);
        attrs.try_set_dimensions(35.0, 24.0, 2.0);
        assert!(attrs.estimate_shipping().approx_eq(Money::new(180.0), 1e-9));

        attrs.set_shipping_policy(Arc::new(ExpressShipping));
        assert!(attrs.estimate_shipping().approx_eq(Money::new(860.0), 1e-9));
        assert!((attrs.shipping_weight() - 1.8).abs() < 1e-12);
    }
}

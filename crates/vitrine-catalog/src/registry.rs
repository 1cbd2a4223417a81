//! # Policy Registries
//!
//! Named lookups from a key such as `"percentage-10"` to a shared policy.
//!
//! ## Default Keys
//! ```text
//! ┌──────────────────────┬──────────────────────┬──────────────────────┐
//! │ DiscountRegistry     │ TaxRegistry          │ ShippingRegistry     │
//! ├──────────────────────┼──────────────────────┼──────────────────────┤
//! │ percentage-10/20/30  │ flat-vat-12          │ standard             │
//! │ fixed-500 (digital)  │ flat-vat-20          │ express              │
//! │ fixed-1000 (digital) │ no-tax               │ free                 │
//! │ bogo-half            │ progressive          │                      │
//! │ buy3-pay2            │ digital-vat-5        │                      │
//! └──────────────────────┴──────────────────────┴──────────────────────┘
//! ```
//!
//! Keys are trimmed and lowercased on both registration and lookup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;
use vitrine_core::pricing::{
    BogoHalf, Buy3Pay2, DiscountPolicy, ExpressShipping, FixedOff, FlatVat, FreeShipping, NoTax,
    PercentageOff, ProgressiveTax, ReducedDigitalVat, ShippingPolicy, StandardShipping, TaxPolicy,
};
use vitrine_core::TaxRate;

use crate::store::{read, write};

/// Thread-safe map from key to a shared policy of type `P`.
pub struct PolicyRegistry<P: ?Sized> {
    entries: RwLock<HashMap<String, Arc<P>>>,
}

pub type DiscountRegistry = PolicyRegistry<dyn DiscountPolicy>;
pub type TaxRegistry = PolicyRegistry<dyn TaxPolicy>;
pub type ShippingRegistry = PolicyRegistry<dyn ShippingPolicy>;

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

impl<P: ?Sized> PolicyRegistry<P> {
    /// Empty registry.
    pub fn new() -> Self {
        PolicyRegistry {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `policy` under `key`, returning the policy it replaced.
    pub fn register(&self, key: &str, policy: Arc<P>) -> Option<Arc<P>> {
        let key = normalize(key);
        info!(key = %key, "Policy registered");
        write(&self.entries).insert(key, policy)
    }

    pub fn get(&self, key: &str) -> Option<Arc<P>> {
        read(&self.entries).get(&normalize(key)).cloned()
    }

    /// Resolves an optional key. Absent and unknown keys both give `None`.
    pub fn resolve(&self, key: Option<&str>) -> Option<Arc<P>> {
        key.and_then(|key| self.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        read(&self.entries).contains_key(&normalize(key))
    }

    pub fn remove(&self, key: &str) -> Option<Arc<P>> {
        write(&self.entries).remove(&normalize(key))
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = read(&self.entries).keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        read(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.entries).is_empty()
    }
}

impl<P: ?Sized> Default for PolicyRegistry<P> {
    fn default() -> Self {
        PolicyRegistry::new()
    }
}

// =============================================================================
// Defaults
// =============================================================================

impl PolicyRegistry<dyn DiscountPolicy> {
    /// Percentage, fixed (digital only), BOGO and buy-3-pay-2 rules.
    pub fn with_defaults() -> Self {
        let registry = DiscountRegistry::new();
        registry.register("percentage-10", Arc::new(PercentageOff::new(10.0)));
        registry.register("percentage-20", Arc::new(PercentageOff::new(20.0)));
        registry.register("percentage-30", Arc::new(PercentageOff::new(30.0)));
        registry.register("fixed-500", Arc::new(FixedOff::digital_only(500.0)));
        registry.register("fixed-1000", Arc::new(FixedOff::digital_only(1000.0)));
        registry.register("bogo-half", Arc::new(BogoHalf));
        registry.register("buy3-pay2", Arc::new(Buy3Pay2));
        registry
    }
}

impl PolicyRegistry<dyn TaxPolicy> {
    /// Flat 12% and 20% VAT, no tax, progressive, 5% digital VAT.
    pub fn with_defaults() -> Self {
        let registry = TaxRegistry::new();
        registry.register("flat-vat-12", Arc::new(FlatVat::from_percentage(12.0)));
        registry.register("flat-vat-20", Arc::new(FlatVat::from_percentage(20.0)));
        registry.register("no-tax", Arc::new(NoTax));
        registry.register("progressive", Arc::new(ProgressiveTax));
        registry.register(
            "digital-vat-5",
            Arc::new(ReducedDigitalVat::new(TaxRate::from_percentage(5.0))),
        );
        registry
    }
}

impl PolicyRegistry<dyn ShippingPolicy> {
    /// Standard, express and free shipping.
    pub fn with_defaults() -> Self {
        let registry = ShippingRegistry::new();
        registry.register("standard", Arc::new(StandardShipping));
        registry.register("express", Arc::new(ExpressShipping));
        registry.register("free", Arc::new(FreeShipping));
        registry
    }

    /// Policy for `key`, falling back to `fallback_key`, then to standard
    /// shipping.
    pub fn resolve_or(&self, key: &str, fallback_key: &str) -> Arc<dyn ShippingPolicy> {
        self.get(key)
            .or_else(|| self.get(fallback_key))
            .unwrap_or_else(|| Arc::new(StandardShipping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::ids::SequentialIds;
    use vitrine_core::{Item, Money};

    #[test]
    fn test_default_keys() {
        assert_eq!(
            DiscountRegistry::with_defaults().keys(),
            vec![
                "bogo-half",
                "buy3-pay2",
                "fixed-1000",
                "fixed-500",
                "percentage-10",
                "percentage-20",
                "percentage-30"
            ]
        );
        assert_eq!(
            TaxRegistry::with_defaults().keys(),
            vec!["digital-vat-5", "flat-vat-12", "flat-vat-20", "no-tax", "progressive"]
        );
        assert_eq!(
            ShippingRegistry::with_defaults().keys(),
            vec!["express", "free", "standard"]
        );
    }

    #[test]
    fn test_keys_are_normalized() {
        let taxes = TaxRegistry::with_defaults();
        assert!(taxes.get(" Flat-VAT-12 ").is_some());
        assert!(taxes.resolve(None).is_none());
        assert!(taxes.resolve(Some("vat-99")).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let taxes = TaxRegistry::new();
        assert!(taxes
            .register("vat", Arc::new(FlatVat::from_percentage(12.0)))
            .is_none());
        let replaced = taxes.register("VAT", Arc::new(FlatVat::from_percentage(15.0)));
        assert!(replaced.is_some());
        assert_eq!(taxes.len(), 1);
        let tax = taxes.get("vat").unwrap().calculate_tax(Money::new(100.0));
        assert!(tax.approx_eq(Money::new(15.0), 1e-9));
        assert!(taxes.remove("vat").is_some());
        assert!(taxes.is_empty());
    }

    #[test]
    fn test_fixed_defaults_are_digital_only() {
        let discounts = DiscountRegistry::with_defaults();
        let ids = SequentialIds::default();
        let mug = Item::generic("G-1", "Mug", 2_000.0, &ids);
        let ebook = Item::digital("D-1", "E-Book", 2_000.0, 12.5, &ids);

        let fixed = discounts.get("fixed-500").unwrap();
        assert!(!fixed.applicable_to(&mug));
        assert!(fixed.applicable_to(&ebook));
    }

    #[test]
    fn test_shipping_fallback() {
        let shipping = ShippingRegistry::with_defaults();
        assert_eq!(shipping.resolve_or("express", "standard").name(), "express");
        assert_eq!(shipping.resolve_or("drone", "free").name(), "free");
        assert_eq!(shipping.resolve_or("drone", "teleport").name(), "standard");
    }
}

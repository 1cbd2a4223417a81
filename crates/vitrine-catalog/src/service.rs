//! # Pricing Service
//!
//! The boundary entry points an API layer calls: quotes, profit reports,
//! shipping estimates and item registration.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote("P-1", 3, Some("percentage-10"), Some("flat-vat-12"))            │
//! │                                                                         │
//! │  CatalogStore::get("P-1") ──── miss ──► 0                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  DiscountRegistry::resolve ── miss ──► no discount                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  item.final_price_with(3, discount)            = subtotal               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  TaxRegistry::resolve ─────── miss ──► no tax                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  subtotal + tax.calculate_tax(subtotal)        = total                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shipping is never added here. It is reported separately by
//! [`PricingService::shipping_estimate`], unless an item opted into
//! `ShippingSurcharge::Included`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use ts_rs::TS;
use vitrine_core::pricing::{DiscountPolicy, NoTax, PriceComposer, TaxPolicy};
use vitrine_core::{
    CoreError, FinancialReport, IdGenerator, Item, ItemBuilder, ItemKind, Money,
    ProfitCalculator, SequentialIds,
};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::registry::{DiscountRegistry, ShippingRegistry, TaxRegistry};
use crate::seed::seed_sample_data;
use crate::store::{CatalogStore, CategoryStore, ItemUpdate, UpdateReport};

/// Parcel size given to physical listings that do not state one, in cm.
pub const DEFAULT_PARCEL_CM: [f64; 3] = [30.0, 20.0, 10.0];

/// Prefix of the license keys handed to digital listings without one.
pub const LICENSE_PREFIX: &str = "LICENSE-";

// =============================================================================
// DTOs
// =============================================================================

/// Priced line for one item and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub item_id: String,
    pub quantity: i64,

    /// Registry key of the discount that was resolved, if any.
    pub discount_key: Option<String>,

    /// Display name of that discount, e.g. `"Percent-10%"`.
    pub discount_name: Option<String>,

    /// Registry key of the tax that was resolved, if any.
    pub tax_key: Option<String>,

    /// Final price before tax.
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,

    /// The resolved discount actually changed how the item was priced.
    pub discount_applied: bool,
    pub tax_applied: bool,

    #[ts(as = "String")]
    pub quoted_at: DateTime<Utc>,
}

/// Input for [`PricingService::register_physical`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalListing {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub weight_kg: f64,
    /// `[length, width, height]` in cm, [`DEFAULT_PARCEL_CM`] when absent.
    #[serde(default)]
    pub dimensions: Option<[f64; 3]>,
    /// Category name, matched case-insensitively.
    #[serde(default)]
    pub category: Option<String>,
    /// Shipping registry key.
    #[serde(default)]
    pub shipping: Option<String>,
}

/// Input for [`PricingService::register_digital`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DigitalListing {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub download_size_mb: f64,
    #[serde(default)]
    pub category: Option<String>,
    /// Generated as `LICENSE-<n>` when absent.
    #[serde(default)]
    pub license_key: Option<String>,
}

// =============================================================================
// Service
// =============================================================================

/// Item and category stores, the three policy registries and the
/// configuration they were built from.
///
/// Every method takes `&self`; share it across threads behind an `Arc`.
pub struct PricingService {
    config: CatalogConfig,
    items: CatalogStore,
    categories: CategoryStore,
    discounts: DiscountRegistry,
    taxes: TaxRegistry,
    shipping: ShippingRegistry,
    /// One counter for `P-n` and `D-n` listing ids.
    listing_ids: SequentialIds,
}

impl PricingService {
    /// Empty catalog with the default registries.
    pub fn new(config: CatalogConfig) -> Self {
        PricingService {
            items: CatalogStore::from_config(&config),
            categories: CategoryStore::new(),
            discounts: DiscountRegistry::with_defaults(),
            taxes: TaxRegistry::with_defaults(),
            shipping: ShippingRegistry::with_defaults(),
            listing_ids: SequentialIds::new(""),
            config,
        }
    }

    /// Like [`PricingService::new`], then installs the sample catalog when
    /// `config.seed_sample_data` is set.
    pub fn bootstrap(config: CatalogConfig) -> CatalogResult<Self> {
        let service = PricingService::new(config);
        if service.config.seed_sample_data {
            let seeded = seed_sample_data(&service)?;
            info!(items = seeded, "Sample catalog installed");
        }
        Ok(service)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn items(&self) -> &CatalogStore {
        &self.items
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn discounts(&self) -> &DiscountRegistry {
        &self.discounts
    }

    pub fn taxes(&self) -> &TaxRegistry {
        &self.taxes
    }

    pub fn shipping(&self) -> &ShippingRegistry {
        &self.shipping
    }

    // -------------------------------------------------------------------------
    // Quotes
    // -------------------------------------------------------------------------

    /// Total payable for `qty` units of an item.
    ///
    /// Unknown items quote zero. Unknown discount or tax keys are treated as
    /// if no key was given.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_catalog::{CatalogConfig, PricingService};
    /// use vitrine_core::{Item, ItemKind, Money};
    ///
    /// let service = PricingService::new(CatalogConfig::default());
    /// let id = service
    ///     .items()
    ///     .insert(Item::builder(ItemKind::Generic).name("Laptop").price(450_000.0))
    ///     .unwrap();
    ///
    /// let total = service.quote(&id, 1, Some("percentage-10"), Some("flat-vat-12"));
    /// assert!(total.approx_eq(Money::new(453_600.0), 1e-6));
    /// assert_eq!(service.quote("missing", 1, None, None), Money::zero());
    /// ```
    pub fn quote(
        &self,
        item_id: &str,
        qty: i64,
        discount_key: Option<&str>,
        tax_key: Option<&str>,
    ) -> Money {
        self.quote_breakdown(item_id, qty, discount_key, tax_key)
            .map(|quote| quote.total)
            .unwrap_or_else(Money::zero)
    }

    /// The same computation as [`PricingService::quote`], itemised.
    ///
    /// `None` when the item does not exist.
    pub fn quote_breakdown(
        &self,
        item_id: &str,
        qty: i64,
        discount_key: Option<&str>,
        tax_key: Option<&str>,
    ) -> Option<Quote> {
        let item = self.lookup(item_id)?;
        let discount = self.resolve_discount(discount_key);

        let subtotal = item.final_price_with(qty, discount.as_deref());
        let discount_applied = qty > 0
            && discount
                .as_deref()
                .is_some_and(|policy| policy.applicable_to(&item) && item.kind().admits(policy));

        Some(self.finish_quote(
            &item,
            qty,
            subtotal,
            discount.map(|policy| (discount_key.unwrap_or_default(), policy)),
            discount_applied,
            tax_key,
        ))
    }

    /// Cheapest quote over several discount keys.
    ///
    /// Unknown keys are skipped. The winning key is the first one that
    /// reaches the lowest subtotal; when none of them lowers the price the
    /// quote carries no discount.
    pub fn best_quote(
        &self,
        item_id: &str,
        qty: i64,
        discount_keys: &[&str],
        tax_key: Option<&str>,
    ) -> Option<Quote> {
        let item = self.lookup(item_id)?;
        let resolved: Vec<(&str, Arc<dyn DiscountPolicy>)> = discount_keys
            .iter()
            .filter_map(|key| self.resolve_discount(Some(*key)).map(|policy| (*key, policy)))
            .collect();
        let policies: Vec<&dyn DiscountPolicy> =
            resolved.iter().map(|(_, policy)| policy.as_ref()).collect();

        let subtotal = item.final_price_best(qty, &policies);
        let undiscounted = item.final_price_with(qty, None);
        let winner = item
            .best_discount(qty, &policies)
            .filter(|(_, total)| *total < undiscounted)
            .and_then(|(policy, _)| {
                // identity, not name: two keys may hold policies with the same name
                resolved
                    .iter()
                    .find(|(_, candidate)| {
                        std::ptr::addr_eq(Arc::as_ptr(candidate), policy as *const _)
                    })
                    .map(|(key, candidate)| (*key, Arc::clone(candidate)))
            });
        let discount_applied = winner.is_some();

        Some(self.finish_quote(&item, qty, subtotal, winner, discount_applied, tax_key))
    }

    fn finish_quote(
        &self,
        item: &Item,
        qty: i64,
        subtotal: Money,
        discount: Option<(&str, Arc<dyn DiscountPolicy>)>,
        discount_applied: bool,
        tax_key: Option<&str>,
    ) -> Quote {
        let tax_policy = self.resolve_tax(tax_key);
        let tax = tax_policy
            .as_ref()
            .map(|policy| policy.calculate_tax(subtotal))
            .unwrap_or_else(Money::zero);

        let (discount_key, discount_name) = match discount {
            Some((key, policy)) => (Some(key.trim().to_string()), Some(policy.name())),
            None => (None, None),
        };

        Quote {
            item_id: item.id().to_string(),
            quantity: qty,
            discount_key,
            discount_name,
            tax_key: tax_policy
                .is_some()
                .then(|| tax_key.unwrap_or_default().trim().to_string()),
            subtotal,
            tax,
            total: subtotal + tax,
            discount_applied,
            tax_applied: tax_policy.is_some(),
            quoted_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Profit report for selling `qty` units. An unknown tax key reports no
    /// tax.
    pub fn profit_report(
        &self,
        item_id: &str,
        qty: i64,
        discount_key: Option<&str>,
        tax_key: Option<&str>,
    ) -> Option<FinancialReport> {
        let item = self.lookup(item_id)?;
        let discount = self.resolve_discount(discount_key);
        let tax: Arc<dyn TaxPolicy> = self.resolve_tax(tax_key).unwrap_or_else(|| Arc::new(NoTax));

        Some(ProfitCalculator.calculate(&item, qty, discount.as_deref(), tax.as_ref()))
    }

    /// [`PricingService::profit_report`] rendered in the configured currency.
    pub fn render_profit_report(
        &self,
        item_id: &str,
        qty: i64,
        discount_key: Option<&str>,
        tax_key: Option<&str>,
    ) -> Option<String> {
        let report = self.profit_report(item_id, qty, discount_key, tax_key)?;
        let title = self.items.with_item(item_id, |item| item.name().to_string())?;
        Some(report.render(
            &title,
            &self.config.currency_code,
            self.config.currency_decimals,
        ))
    }

    /// One parcel's shipping charge. `None` for unknown and non-physical
    /// items.
    pub fn shipping_estimate(&self, item_id: &str) -> Option<Money> {
        self.items
            .with_item(item_id, Item::shipping_estimate)
            .flatten()
    }

    /// Amount in the configured currency, e.g. `"453600.00 KZT"`.
    pub fn format_amount(&self, amount: Money) -> String {
        self.config.format_amount(amount)
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Registers a physical item as `P-<n>`.
    ///
    /// An unknown shipping key falls back to `config.default_shipping`. An
    /// unknown category leaves the item uncategorised.
    ///
    /// ## Errors
    /// - `Core` when the store is in strict mode and a field is invalid
    pub fn register_physical(&self, listing: &PhysicalListing) -> CatalogResult<Item> {
        let number = self.listing_ids.next_id();
        let shipping = self.shipping.resolve_or(
            listing.shipping.as_deref().unwrap_or(&self.config.default_shipping),
            &self.config.default_shipping,
        );
        let [length, width, height] = listing.dimensions.unwrap_or(DEFAULT_PARCEL_CM);

        let mut builder = Item::builder(ItemKind::physical())
            .id(format!("P-{number}"))
            .name(listing.name.as_str())
            .price(listing.price)
            .quantity(listing.quantity)
            .weight_kg(listing.weight_kg)
            .dimensions(length, width, height)
            .shipping_policy(shipping);
        if let Some(description) = &listing.description {
            builder = builder.description(description.as_str());
        }

        self.store_listing(builder, listing.category.as_deref())
    }

    /// Registers a digital item as `D-<n>` with license `LICENSE-<n>` unless
    /// the listing brings its own key.
    ///
    /// ## Errors
    /// - `Core` when the store is in strict mode and a field is invalid
    pub fn register_digital(&self, listing: &DigitalListing) -> CatalogResult<Item> {
        let number = self.listing_ids.next_id();
        let license = listing
            .license_key
            .clone()
            .unwrap_or_else(|| format!("{LICENSE_PREFIX}{number}"));

        let mut builder = Item::builder(ItemKind::digital())
            .id(format!("D-{number}"))
            .name(listing.name.as_str())
            .price(listing.price)
            .quantity(listing.quantity)
            .download_size_mb(listing.download_size_mb)
            .license_key(license);
        if let Some(description) = &listing.description {
            builder = builder.description(description.as_str());
        }

        self.store_listing(builder, listing.category.as_deref())
    }

    fn store_listing(
        &self,
        builder: ItemBuilder,
        category: Option<&str>,
    ) -> CatalogResult<Item> {
        let item = self.items.build(builder)?;
        let category_id = category.and_then(|name| match self.categories.by_name(name) {
            Some(category) => Some(category.id()),
            None => {
                debug!(item_id = %item.id(), category = %name, "Unknown category, item left uncategorised");
                None
            }
        });
        self.store_item(item, category_id)
    }

    /// Stores `item` and files it under `category_id`. A failed filing takes
    /// the item back out, so an `Err` never leaves a stored item behind.
    fn store_item(&self, item: Item, category_id: Option<u64>) -> CatalogResult<Item> {
        let id = item.id().to_string();
        self.items.put(item);

        if let Some(category_id) = category_id {
            if let Err(err) = self.categories.add_item(&self.items, category_id, &id) {
                self.items.remove(&id);
                warn!(item_id = %id, category_id, error = %err, "Registration rolled back");
                return Err(err);
            }
        }

        self.items
            .get(&id)
            .ok_or_else(|| CatalogError::not_found("Item", id))
    }

    /// Swaps a physical item's shipping policy for the one under `key`.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown item or shipping key
    /// - `Core(AttributeKindMismatch)` when the item is not physical
    pub fn set_shipping(&self, item_id: &str, key: &str) -> CatalogResult<()> {
        let policy = self
            .shipping
            .get(key)
            .ok_or_else(|| CatalogError::not_found("Shipping policy", key))?;

        let kind = self
            .items
            .with_item_mut(item_id, |item| {
                if item.set_shipping_policy(policy) {
                    None
                } else {
                    Some(item.kind().label())
                }
            })
            .ok_or_else(|| CatalogError::not_found("Item", item_id))?;

        match kind {
            None => {
                debug!(item_id, key, "Shipping policy changed");
                Ok(())
            }
            Some(kind) => Err(CoreError::AttributeKindMismatch {
                attribute: "shippingPolicy",
                kind,
            }
            .into()),
        }
    }

    /// Applies a partial update. `None` when the item does not exist.
    pub fn update_item(&self, item_id: &str, update: &ItemUpdate) -> Option<UpdateReport> {
        self.items.update(item_id, update)
    }

    /// Gives an item a new id, carrying its category membership along.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown item
    /// - `Duplicate` when `new_id` is taken
    /// - `Core` when `new_id` is not a valid id
    pub fn rename_item(&self, item_id: &str, new_id: &str) -> CatalogResult<Item> {
        self.categories.rename_item(&self.items, item_id, new_id)
    }

    /// Removes an item and drops its id from every category.
    pub fn remove_item(&self, item_id: &str) -> Option<Item> {
        let removed = self.items.remove(item_id)?;
        self.categories.forget_item(item_id);
        Some(removed)
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    fn lookup(&self, item_id: &str) -> Option<Item> {
        let item = self.items.get(item_id);
        if item.is_none() {
            debug!(item_id, "Unknown item");
        }
        item
    }

    fn resolve_discount(&self, key: Option<&str>) -> Option<Arc<dyn DiscountPolicy>> {
        let policy = self.discounts.resolve(key);
        if let (Some(key), None) = (key, &policy) {
            debug!(key, "Unknown discount key ignored");
        }
        policy
    }

    fn resolve_tax(&self, key: Option<&str>) -> Option<Arc<dyn TaxPolicy>> {
        let policy = self.taxes.resolve(key);
        if let (Some(key), None) = (key, &policy) {
            debug!(key, "Unknown tax key ignored");
        }
        policy
    }
}

impl Default for PricingService {
    fn default() -> Self {
        PricingService::new(CatalogConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::pricing::FixedOff;
    use vitrine_core::{Category, ConstructionMode, ShippingSurcharge};

    fn laptop_listing() -> PhysicalListing {
        PhysicalListing {
            name: "Laptop".to_string(),
            description: None,
            price: 450_000.0,
            quantity: 5,
            weight_kg: 1.8,
            dimensions: None,
            category: Some("electronics".to_string()),
            shipping: Some("express".to_string()),
        }
    }

    fn ebook_listing() -> DigitalListing {
        DigitalListing {
            name: "E-Book".to_string(),
            description: Some("Rust in practice".to_string()),
            price: 2_000.0,
            quantity: 100,
            download_size_mb: 12.5,
            category: None,
            license_key: None,
        }
    }

    #[test]
    fn test_listing_ids_share_one_counter() {
        let service = PricingService::default();
        service.categories().create("Electronics", "").unwrap();

        let laptop = service.register_physical(&laptop_listing()).unwrap();
        let ebook = service.register_digital(&ebook_listing()).unwrap();

        assert_eq!(laptop.id(), "P-1");
        assert_eq!(ebook.id(), "D-2");
        assert_eq!(ebook.as_digital().unwrap().license_key(), Some("LICENSE-2"));
        assert_eq!(
            laptop.as_physical().unwrap().dimensions(),
            (30.0, 20.0, 10.0)
        );
        assert_eq!(laptop.as_physical().unwrap().shipping_policy().name(), "express");
        assert!(laptop.category_id().is_some());
    }

    #[test]
    fn test_unknown_shipping_key_uses_configured_default() {
        let service = PricingService::new(CatalogConfig {
            default_shipping: "free".to_string(),
            ..CatalogConfig::default()
        });
        let listing = PhysicalListing {
            shipping: Some("drone".to_string()),
            category: Some("Nowhere".to_string()),
            ..laptop_listing()
        };
        let laptop = service.register_physical(&listing).unwrap();

        assert_eq!(laptop.as_physical().unwrap().shipping_policy().name(), "free");
        assert_eq!(laptop.category_id(), None);
    }

    #[test]
    fn test_quote_breakdown() {
        let service = PricingService::default();
        service.categories().create("Electronics", "").unwrap();
        let laptop = service.register_physical(&laptop_listing()).unwrap();

        let quote = service
            .quote_breakdown(laptop.id(), 1, Some("percentage-10"), Some("flat-vat-12"))
            .unwrap();
        assert!(quote.subtotal.approx_eq(Money::new(405_000.0), 1e-9));
        assert!(quote.tax.approx_eq(Money::new(48_600.0), 1e-9));
        assert!(quote.total.approx_eq(Money::new(453_600.0), 1e-9));
        assert!(quote.discount_applied);
        assert!(quote.tax_applied);
        assert_eq!(quote.discount_name.as_deref(), Some("Percent-10%"));
        assert_eq!(quote.tax_key.as_deref(), Some("flat-vat-12"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let service = PricingService::default();
        let laptop = service.register_physical(&laptop_listing()).unwrap();

        let quote = service
            .quote_breakdown(laptop.id(), 2, Some("half-off"), Some("vat-99"))
            .unwrap();
        assert_eq!(quote.total, Money::new(900_000.0));
        assert!(!quote.discount_applied);
        assert!(!quote.tax_applied);
        assert_eq!(quote.discount_key, None);
        assert_eq!(quote.tax_key, None);
    }

    #[test]
    fn test_inapplicable_discount_is_reported() {
        let service = PricingService::default();
        let laptop = service.register_physical(&laptop_listing()).unwrap();

        let quote = service
            .quote_breakdown(laptop.id(), 1, Some("fixed-500"), None)
            .unwrap();
        assert_eq!(quote.total, Money::new(450_000.0));
        assert_eq!(quote.discount_key.as_deref(), Some("fixed-500"));
        assert!(!quote.discount_applied);
    }

    #[test]
    fn test_best_quote_names_the_winner() {
        let service = PricingService::default();
        let laptop = service.register_physical(&laptop_listing()).unwrap();

        let quote = service
            .best_quote(
                laptop.id(),
                3,
                &["percentage-10", "nope", "buy3-pay2", "bogo-half"],
                None,
            )
            .unwrap();
        assert_eq!(quote.total, Money::new(900_000.0));
        assert_eq!(quote.discount_key.as_deref(), Some("buy3-pay2"));
        assert!(quote.discount_applied);

        let none = service
            .best_quote(laptop.id(), 1, &["fixed-500", "bogo-half"], None)
            .unwrap();
        assert_eq!(none.total, Money::new(450_000.0));
        assert_eq!(none.discount_key, None);
        assert!(!none.discount_applied);
    }

    #[test]
    fn test_best_quote_tells_same_named_policies_apart() {
        let service = PricingService::default();
        service
            .discounts()
            .register("promo-500", Arc::new(FixedOff::new(500.0)));
        let mug = service
            .items()
            .insert(Item::builder(ItemKind::Generic).name("Mug").price(2_000.0))
            .unwrap();
        assert_eq!(
            service.discounts().get("fixed-500").unwrap().name(),
            service.discounts().get("promo-500").unwrap().name()
        );

        let best = service
            .best_quote(&mug, 1, &["fixed-500", "promo-500"], None)
            .unwrap();
        assert_eq!(best.total, Money::new(1_500.0));
        assert_eq!(best.discount_key.as_deref(), Some("promo-500"));

        let again = service.quote(&mug, 1, best.discount_key.as_deref(), None);
        assert_eq!(again, best.total);
    }

    #[test]
    fn test_failed_filing_leaves_nothing_stored() {
        let service = PricingService::default();
        let item = service
            .items()
            .build(Item::builder(ItemKind::Generic).name("Mug").price(10.0))
            .unwrap();
        let id = item.id().to_string();

        let err = service.store_item(item, Some(42)).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert!(!service.items().contains(&id));
        assert!(service.items().is_empty());
    }

    #[test]
    fn test_rename_item_keeps_category_in_step() {
        let service = PricingService::default();
        let mugs = service.categories().create("Mugs", "").unwrap();
        for (id, name) in [("G-OLD", "Alpha"), ("G-B", "Beta")] {
            service
                .items()
                .put(Item::generic(id, name, 10.0, service.items().id_generator()));
        }
        service
            .categories()
            .add_item(service.items(), mugs.id(), "G-OLD")
            .unwrap();

        let renamed = service.rename_item("G-OLD", "G-NEW").unwrap();
        assert_eq!(renamed.category_id(), Some(mugs.id()));
        assert!(service.categories().get(mugs.id()).unwrap().contains("G-NEW"));
        assert!(!service.categories().get(mugs.id()).unwrap().contains("G-OLD"));
        service
            .categories()
            .remove_item(service.items(), mugs.id(), "G-NEW")
            .unwrap();

        assert!(matches!(
            service.rename_item("G-NEW", "G-B"),
            Err(CatalogError::Duplicate { .. })
        ));
        assert_eq!(service.items().len(), 2);
        assert_eq!(service.items().get("G-B").unwrap().name(), "Beta");
        assert!(matches!(
            service.rename_item("G-GONE", "G-X"),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_quote_excludes_shipping_unless_included() {
        let service = PricingService::default();
        let laptop = service.register_physical(&laptop_listing()).unwrap();

        let shipping = service.shipping_estimate(laptop.id()).unwrap();
        assert!(shipping.approx_eq(Money::new(860.0), 1e-9));
        assert_eq!(service.quote(laptop.id(), 1, None, None), Money::new(450_000.0));

        service
            .items()
            .with_item_mut(laptop.id(), |item| {
                item.set_shipping_surcharge(ShippingSurcharge::Included)
            })
            .unwrap();
        let total = service.quote(laptop.id(), 1, None, None);
        assert!(total.approx_eq(Money::new(450_860.0), 1e-9));
    }

    #[test]
    fn test_profit_report_and_rendering() {
        let service = PricingService::default();
        let laptop = service.register_physical(&laptop_listing()).unwrap();
        service
            .items()
            .with_item_mut(laptop.id(), |item| item.try_set_cost_price(350_000.0));

        let report = service
            .profit_report(laptop.id(), 1, Some("percentage-10"), Some("unknown"))
            .unwrap();
        assert!(report.tax_amount.is_zero());
        assert!(report.net_profit.approx_eq(Money::new(55_000.0), 1e-9));

        let text = service
            .render_profit_report(laptop.id(), 1, Some("percentage-10"), Some("flat-vat-12"))
            .unwrap();
        assert!(text.contains("FINANCIAL REPORT: Laptop"));
        assert!(text.contains("48600.00 KZT"));
        assert!(service.profit_report("missing", 1, None, None).is_none());
    }

    #[test]
    fn test_set_shipping() {
        let service = PricingService::default();
        let laptop = service.register_physical(&laptop_listing()).unwrap();
        let ebook = service.register_digital(&ebook_listing()).unwrap();

        service.set_shipping(laptop.id(), "standard").unwrap();
        let standard = service.shipping_estimate(laptop.id()).unwrap();
        assert!(standard.approx_eq(Money::new(180.0), 1e-9));

        assert!(matches!(
            service.set_shipping(ebook.id(), "standard"),
            Err(CatalogError::Core(CoreError::AttributeKindMismatch { .. }))
        ));
        assert!(matches!(
            service.set_shipping(laptop.id(), "drone"),
            Err(CatalogError::NotFound { .. })
        ));
        assert!(service.shipping_estimate(ebook.id()).is_none());
    }

    #[test]
    fn test_remove_item_forgets_membership() {
        let service = PricingService::default();
        let electronics = service.categories().create("Electronics", "").unwrap();
        let laptop = service.register_physical(&laptop_listing()).unwrap();

        assert!(service.remove_item(laptop.id()).is_some());
        let electronics: Category = service.categories().get(electronics.id()).unwrap();
        assert!(electronics.is_empty());
        assert!(service.remove_item(laptop.id()).is_none());
    }

    #[test]
    fn test_strict_registration_rejects_bad_listing() {
        let service = PricingService::new(CatalogConfig {
            construction_mode: ConstructionMode::Strict,
            ..CatalogConfig::default()
        });
        let listing = PhysicalListing {
            price: -1.0,
            ..laptop_listing()
        };
        assert!(matches!(
            service.register_physical(&listing),
            Err(CatalogError::Core(CoreError::InvalidConstruction(_)))
        ));
        assert!(service.items().is_empty());
    }
}

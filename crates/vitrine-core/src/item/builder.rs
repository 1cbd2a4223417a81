//! # Item Builder
//!
//! Construction of items in either [`ConstructionMode`].
//!
//! ## Construction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ItemBuilder::new(kind).id(..).name(..).price(..)...                    │
//! │                        │                                                │
//! │                        ▼                                                │
//! │   assemble: run every supplied field through its validator             │
//! │             rejected fields fall back to their default                 │
//! │             and are collected                                          │
//! │                        │                                                │
//! │          ┌─────────────┴──────────────┐                                 │
//! │          ▼                            ▼                                 │
//! │     Permissive                     Strict                               │
//! │   warn! per rejection       first rejection → CoreError                 │
//! │   item with defaults        no id is consumed                           │
//! │          │                            │                                 │
//! │          └──────────► id missing? ids.next_id()                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing id is never an error. A missing name becomes "Unnamed" in
//! permissive mode and is rejected in strict mode.

use std::sync::Arc;
use tracing::warn;

use super::{Item, ItemKind};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ids::IdGenerator;
use crate::pricing::shipping::ShippingPolicy;
use crate::types::{ConstructionMode, DigitalMarkdown, DiscountFamily, ShippingSurcharge};
use crate::validation::{
    validate_cost_price, validate_description, validate_dimensions, validate_download_size_mb,
    validate_id, validate_license_key, validate_name, validate_price, validate_quantity,
    validate_weight_kg,
};

/// Collects construction input for an [`Item`].
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    kind: ItemKind,
    mode: ConstructionMode,
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    cost_price: Option<f64>,
    quantity: Option<i64>,
    weight_kg: Option<f64>,
    dimensions: Option<(f64, f64, f64)>,
    shipping: Option<Arc<dyn ShippingPolicy>>,
    surcharge: Option<ShippingSurcharge>,
    download_size_mb: Option<f64>,
    license_key: Option<String>,
    ignored_discounts: Vec<DiscountFamily>,
    digital_markdown: Option<DigitalMarkdown>,
}

impl ItemBuilder {
    pub fn new(kind: ItemKind) -> Self {
        ItemBuilder {
            kind,
            mode: ConstructionMode::default(),
            id: None,
            name: None,
            description: None,
            price: None,
            cost_price: None,
            quantity: None,
            weight_kg: None,
            dimensions: None,
            shipping: None,
            surcharge: None,
            download_size_mb: None,
            license_key: None,
            ignored_discounts: Vec::new(),
            digital_markdown: None,
        }
    }

    pub fn mode(mut self, mode: ConstructionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn cost_price(mut self, cost_price: f64) -> Self {
        self.cost_price = Some(cost_price);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn dimensions(mut self, length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        self.dimensions = Some((length_cm, width_cm, height_cm));
        self
    }

    pub fn shipping_policy(mut self, policy: Arc<dyn ShippingPolicy>) -> Self {
        self.shipping = Some(policy);
        self
    }

    pub fn shipping_surcharge(mut self, surcharge: ShippingSurcharge) -> Self {
        self.surcharge = Some(surcharge);
        self
    }

    pub fn download_size_mb(mut self, size_mb: f64) -> Self {
        self.download_size_mb = Some(size_mb);
        self
    }

    pub fn license_key(mut self, key: impl Into<String>) -> Self {
        self.license_key = Some(key.into());
        self
    }

    pub fn ignore_discount(mut self, family: DiscountFamily) -> Self {
        if !self.ignored_discounts.contains(&family) {
            self.ignored_discounts.push(family);
        }
        self
    }

    pub fn digital_markdown(mut self, markdown: DigitalMarkdown) -> Self {
        self.digital_markdown = Some(markdown);
        self
    }

    /// Builds the item in the configured mode.
    ///
    /// ## Errors
    /// Only in [`ConstructionMode::Strict`]: the first rejected field as
    /// [`CoreError::InvalidConstruction`], or
    /// [`CoreError::AttributeKindMismatch`] for an attribute the kind does
    /// not carry.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::ids::SequentialIds;
    /// use vitrine_core::{ConstructionMode, Item, ItemKind};
    ///
    /// let ids = SequentialIds::default();
    /// let strict = Item::builder(ItemKind::Generic)
    ///     .mode(ConstructionMode::Strict)
    ///     .id("X")
    ///     .name("Mug")
    ///     .build(&ids);
    /// assert!(strict.is_err());
    ///
    /// let lenient = Item::builder(ItemKind::Generic).id("X").name("Mug").build(&ids);
    /// assert_eq!(lenient.unwrap().id(), "AUTO-1");
    /// ```
    pub fn build(self, ids: &dyn IdGenerator) -> CoreResult<Item> {
        let mode = self.mode;
        let (draft, rejected) = self.assemble();

        if mode == ConstructionMode::Strict {
            if let Some(err) = rejected.into_iter().next() {
                return Err(err);
            }
            return Ok(finish(draft, ids));
        }

        Ok(finish_permissive(draft, &rejected, ids))
    }

    /// Builds with default substitution regardless of the configured mode.
    pub fn build_permissive(self, ids: &dyn IdGenerator) -> Item {
        let (draft, rejected) = self.assemble();
        finish_permissive(draft, &rejected, ids)
    }

    /// Applies every supplied field, returning the draft item (id possibly
    /// empty) and every rejection in field order.
    fn assemble(self) -> (Item, Vec<CoreError>) {
        let mut rejected: Vec<CoreError> = Vec::new();
        let kind_label = self.kind.label();

        let id = match self.id.as_deref().map(validate_id) {
            Some(Ok(id)) => id,
            Some(Err(err)) => {
                rejected.push(err.into());
                String::new()
            }
            None => String::new(),
        };

        let name = match self.name.as_deref().map(validate_name) {
            Some(Ok(name)) => name,
            Some(Err(err)) => {
                rejected.push(err.into());
                crate::DEFAULT_ITEM_NAME.to_string()
            }
            None => {
                if self.mode == ConstructionMode::Strict {
                    rejected.push(
                        ValidationError::Required {
                            field: "name".to_string(),
                        }
                        .into(),
                    );
                }
                crate::DEFAULT_ITEM_NAME.to_string()
            }
        };

        let mut item = Item::from_parts(id, name, self.kind);

        if let Err(err) = validate_description(self.description.as_deref()) {
            rejected.push(err.into());
        } else {
            item.try_set_description(self.description.as_deref());
        }

        if let Some(price) = self.price {
            match validate_price(price) {
                Ok(price) => {
                    item.try_set_price(price);
                }
                Err(err) => rejected.push(err.into()),
            }
        }

        if let Some(cost_price) = self.cost_price {
            match validate_cost_price(cost_price) {
                Ok(cost_price) => {
                    item.try_set_cost_price(cost_price);
                }
                Err(err) => rejected.push(err.into()),
            }
        }

        if let Some(quantity) = self.quantity {
            match validate_quantity(quantity) {
                Ok(quantity) => {
                    item.try_set_quantity(quantity);
                }
                Err(err) => rejected.push(err.into()),
            }
        }

        // Physical attributes
        if let Some(weight_kg) = self.weight_kg {
            if !item.is_physical() {
                rejected.push(mismatch("weight_kg", kind_label));
            } else if let Err(err) = validate_weight_kg(weight_kg) {
                rejected.push(err.into());
            } else {
                item.try_set_weight_kg(weight_kg);
            }
        }

        if let Some((length, width, height)) = self.dimensions {
            if !item.is_physical() {
                rejected.push(mismatch("dimensions", kind_label));
            } else if let Err(err) = validate_dimensions(length, width, height) {
                rejected.push(err.into());
            } else {
                item.try_set_dimensions(length, width, height);
            }
        }

        if let Some(policy) = self.shipping {
            if !item.set_shipping_policy(policy) {
                rejected.push(mismatch("shipping_policy", kind_label));
            }
        }

        if let Some(surcharge) = self.surcharge {
            if !item.set_shipping_surcharge(surcharge) {
                rejected.push(mismatch("shipping_surcharge", kind_label));
            }
        }

        // Digital attributes. The markdown mode goes first so that a legacy
        // item is marked down by its initial download size too.
        let digital_fields_supplied = self.digital_markdown.is_some()
            || self.license_key.is_some()
            || self.download_size_mb.is_some()
            || !self.ignored_discounts.is_empty();

        match item.digital_attributes_mut() {
            Some(attrs) => {
                if let Some(markdown) = self.digital_markdown {
                    attrs.set_markdown(markdown);
                }
                for family in self.ignored_discounts {
                    attrs.ignore_discount(family);
                }
            }
            None if digital_fields_supplied => {
                rejected.push(mismatch("digital attributes", kind_label));
            }
            None => {}
        }

        if item.is_digital() {
            if let Some(key) = self.license_key.as_deref() {
                match validate_license_key(Some(key)) {
                    Ok(_) => {
                        item.try_set_license_key(Some(key));
                    }
                    Err(err) => rejected.push(err.into()),
                }
            }

            if let Some(size_mb) = self.download_size_mb {
                match validate_download_size_mb(size_mb) {
                    Ok(size_mb) => {
                        item.try_set_download_size_mb(size_mb);
                    }
                    Err(err) => rejected.push(err.into()),
                }
            }
        }

        (item, rejected)
    }
}

fn mismatch(attribute: &'static str, kind: &'static str) -> CoreError {
    CoreError::AttributeKindMismatch { attribute, kind }
}

fn finish(mut draft: Item, ids: &dyn IdGenerator) -> Item {
    if draft.id.is_empty() {
        draft.id = ids.next_id();
    }
    draft
}

/// Finishes the draft, then reports each substitution against the final id.
fn finish_permissive(draft: Item, rejected: &[CoreError], ids: &dyn IdGenerator) -> Item {
    let item = finish(draft, ids);
    for err in rejected {
        warn!(item_id = %item.id, error = %err, "Substituted default during item construction");
    }
    item
}

// =============================================================================
// Unit Tests
// =============================================================================

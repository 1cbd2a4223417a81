//! # Items
//!
//! The priced entity of the catalog.
//!
//! ## Item Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Item                                       │
//! │  id · name · description · price · cost_price · quantity · category_id  │
//! │                                │                                        │
//! │                          kind: ItemKind                                 │
//! │          ┌─────────────────────┼──────────────────────┐                 │
//! │          ▼                     ▼                      ▼                 │
//! │      Generic          Physical(attrs)          Digital(attrs)          │
//! │                      weight, L×W×H,           download size,           │
//! │                      shipping policy          license key,             │
//! │                                               ignored discounts        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Contract
//! Every bounded field changes only through a `try_set_*` method. It either
//! commits the new value and returns `true`, or returns `false` and leaves
//! the item exactly as it was. Nothing here panics or returns an error for
//! out-of-range input.
//!
//! ## Category Link
//! `category_id` is a plain lookup field. Only [`crate::category::Category`]
//! membership operations write it, so the item never holds a reference to
//! the category that groups it.

mod builder;
mod digital;
mod physical;

pub use builder::ItemBuilder;
pub use digital::DigitalAttributes;
pub use physical::{PhysicalAttributes, Shippable};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use ts_rs::TS;

use crate::ids::IdGenerator;
use crate::money::Money;
use crate::pricing::shipping::ShippingPolicy;
use crate::types::{ShippingSurcharge, StockStatus};
use crate::validation::{
    validate_cost_price, validate_description, validate_id, validate_markdown_percent,
    validate_name, validate_price, validate_quantity,
};
use digital::SizeAssignment;

// =============================================================================
// Item Kind
// =============================================================================

/// Kind-specific part of an item.
#[derive(Debug, Clone)]
pub enum ItemKind {
    Generic,
    Physical(PhysicalAttributes),
    Digital(DigitalAttributes),
}

impl ItemKind {
    /// A physical kind with zero size and standard shipping.
    pub fn physical() -> Self {
        ItemKind::Physical(PhysicalAttributes::new())
    }

    /// A digital kind with no license and no size.
    pub fn digital() -> Self {
        ItemKind::Digital(DigitalAttributes::new())
    }

    /// Lowercase label used in logs, errors and snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Generic => "generic",
            ItemKind::Physical(_) => "physical",
            ItemKind::Digital(_) => "digital",
        }
    }
}

impl Default for ItemKind {
    fn default() -> Self {
        ItemKind::Generic
    }
}

// =============================================================================
// Item
// =============================================================================

/// A sellable catalog entry.
#[derive(Debug, Clone)]
pub struct Item {
    id: String,
    name: String,
    description: Option<String>,
    price: f64,
    cost_price: f64,
    quantity: i64,
    category_id: Option<u64>,
    kind: ItemKind,
}

impl Item {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Starts a builder for an item of the given kind.
    pub fn builder(kind: ItemKind) -> ItemBuilder {
        ItemBuilder::new(kind)
    }

    /// Generic item with permissive defaults and zero stock.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::ids::SequentialIds;
    /// use vitrine_core::Item;
    ///
    /// let ids = SequentialIds::default();
    /// let item = Item::generic("X", "Mug", -5.0, &ids);
    /// assert_eq!(item.id(), "AUTO-1");
    /// assert_eq!(item.price().amount(), 0.0);
    /// ```
    pub fn generic(id: &str, name: &str, price: f64, ids: &dyn IdGenerator) -> Item {
        ItemBuilder::new(ItemKind::Generic)
            .id(id)
            .name(name)
            .price(price)
            .build_permissive(ids)
    }

    /// Physical item with a weight and no package dimensions yet.
    pub fn physical(id: &str, name: &str, price: f64, weight_kg: f64, ids: &dyn IdGenerator) -> Item {
        ItemBuilder::new(ItemKind::physical())
            .id(id)
            .name(name)
            .price(price)
            .weight_kg(weight_kg)
            .build_permissive(ids)
    }

    /// Digital item with a download size and no license key.
    pub fn digital(id: &str, name: &str, price: f64, download_size_mb: f64, ids: &dyn IdGenerator) -> Item {
        ItemBuilder::new(ItemKind::digital())
            .id(id)
            .name(name)
            .price(price)
            .download_size_mb(download_size_mb)
            .build_permissive(ids)
    }

    /// Generated id, "Unnamed", price 0, quantity 0.
    pub fn unnamed(ids: &dyn IdGenerator) -> Item {
        Item::from_parts(ids.next_id(), crate::DEFAULT_ITEM_NAME.to_string(), ItemKind::Generic)
    }

    /// Free generic item with one unit in stock.
    pub fn free_sample(name: &str, ids: &dyn IdGenerator) -> Item {
        ItemBuilder::new(ItemKind::Generic)
            .name(name)
            .quantity(1)
            .build_permissive(ids)
    }

    pub(crate) fn from_parts(id: String, name: String, kind: ItemKind) -> Item {
        Item {
            id,
            name,
            description: None,
            price: 0.0,
            cost_price: 0.0,
            quantity: 0,
            category_id: None,
            kind,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Unit price.
    pub fn price(&self) -> Money {
        Money::new(self.price)
    }

    /// Unit cost of goods, used by the profit calculator.
    pub fn cost_price(&self) -> Money {
        Money::new(self.cost_price)
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn category_id(&self) -> Option<u64> {
        self.category_id
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn is_physical(&self) -> bool {
        matches!(self.kind, ItemKind::Physical(_))
    }

    pub fn is_digital(&self) -> bool {
        matches!(self.kind, ItemKind::Digital(_))
    }

    pub fn as_physical(&self) -> Option<&PhysicalAttributes> {
        match &self.kind {
            ItemKind::Physical(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_digital(&self) -> Option<&DigitalAttributes> {
        match &self.kind {
            ItemKind::Digital(attrs) => Some(attrs),
            _ => None,
        }
    }

    fn physical_mut(&mut self) -> Option<&mut PhysicalAttributes> {
        match &mut self.kind {
            ItemKind::Physical(attrs) => Some(attrs),
            _ => None,
        }
    }

    fn digital_mut(&mut self) -> Option<&mut DigitalAttributes> {
        match &mut self.kind {
            ItemKind::Digital(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Derived from the quantity on every call.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_quantity(self.quantity)
    }

    /// Price × quantity of everything in stock.
    pub fn calculate_total_value(&self) -> Money {
        self.price() * self.quantity
    }

    /// `false` for anything that is not a digital item with a license key.
    pub fn is_license_required(&self) -> bool {
        self.as_digital()
            .is_some_and(DigitalAttributes::is_license_required)
    }

    /// Shipping charge for one parcel, physical items only.
    pub fn shipping_estimate(&self) -> Option<Money> {
        self.as_physical().map(Shippable::estimate_shipping)
    }

    /// Billable weight, physical items only.
    pub fn shipping_weight(&self) -> Option<f64> {
        self.as_physical().map(Shippable::shipping_weight)
    }

    // -------------------------------------------------------------------------
    // Validated Mutators
    // -------------------------------------------------------------------------

    pub fn try_set_id(&mut self, id: &str) -> bool {
        match validate_id(id) {
            Ok(id) => {
                self.id = id;
                true
            }
            Err(_) => false,
        }
    }

    pub fn try_set_name(&mut self, name: &str) -> bool {
        match validate_name(name) {
            Ok(name) => {
                self.name = name;
                true
            }
            Err(_) => false,
        }
    }

    pub fn try_set_description(&mut self, description: Option<&str>) -> bool {
        match validate_description(description) {
            Ok(description) => {
                self.description = description;
                true
            }
            Err(_) => false,
        }
    }

    pub fn try_set_price(&mut self, price: f64) -> bool {
        match validate_price(price) {
            Ok(price) => {
                self.price = price;
                true
            }
            Err(_) => false,
        }
    }

    pub fn try_set_cost_price(&mut self, cost_price: f64) -> bool {
        match validate_cost_price(cost_price) {
            Ok(cost_price) => {
                self.cost_price = cost_price;
                true
            }
            Err(_) => false,
        }
    }

    pub fn try_set_quantity(&mut self, quantity: i64) -> bool {
        match validate_quantity(quantity) {
            Ok(quantity) => {
                self.quantity = quantity;
                true
            }
            Err(_) => false,
        }
    }

    /// Receives `amount` units into stock.
    ///
    /// Fails when `amount` is not positive or the result would leave the
    /// quantity bounds.
    pub fn add_stock(&mut self, amount: i64) -> bool {
        if amount <= 0 {
            return false;
        }
        match self.quantity.checked_add(amount) {
            Some(total) => self.try_set_quantity(total),
            None => false,
        }
    }

    /// Removes `amount` sold units from stock. Overselling is refused.
    pub fn sell(&mut self, amount: i64) -> bool {
        if amount <= 0 || amount > self.quantity {
            return false;
        }
        self.try_set_quantity(self.quantity - amount)
    }

    /// Permanently lowers the unit price by `percent` (0-90).
    ///
    /// Unlike a discount policy this rewrites the stored price.
    pub fn apply_markdown(&mut self, percent: f64) -> bool {
        match validate_markdown_percent(percent) {
            Ok(percent) => self.try_set_price(self.price * (1.0 - percent / 100.0)),
            Err(_) => false,
        }
    }

    pub fn try_set_weight_kg(&mut self, weight_kg: f64) -> bool {
        self.physical_mut()
            .is_some_and(|attrs| attrs.try_set_weight_kg(weight_kg))
    }

    pub fn try_set_dimensions(&mut self, length_cm: f64, width_cm: f64, height_cm: f64) -> bool {
        self.physical_mut()
            .is_some_and(|attrs| attrs.try_set_dimensions(length_cm, width_cm, height_cm))
    }

    /// Replaces the shipping policy. `false` for non-physical items.
    pub fn set_shipping_policy(&mut self, policy: Arc<dyn ShippingPolicy>) -> bool {
        match self.physical_mut() {
            Some(attrs) => {
                attrs.set_shipping_policy(policy);
                true
            }
            None => false,
        }
    }

    pub fn set_shipping_surcharge(&mut self, surcharge: ShippingSurcharge) -> bool {
        match self.physical_mut() {
            Some(attrs) => {
                attrs.set_surcharge(surcharge);
                true
            }
            None => false,
        }
    }

    /// Sets the download size of a digital item.
    ///
    /// With [`crate::types::DigitalMarkdown::Legacy`] a size below the
    /// legacy threshold also marks the price down by 10%.
    pub fn try_set_download_size_mb(&mut self, size_mb: f64) -> bool {
        let outcome = match self.digital_mut() {
            Some(attrs) => attrs.assign_download_size(size_mb),
            None => return false,
        };
        match outcome {
            SizeAssignment::Rejected => false,
            SizeAssignment::Accepted => true,
            SizeAssignment::AcceptedWithMarkdown => {
                self.apply_markdown(crate::LEGACY_MARKDOWN_PERCENT);
                true
            }
        }
    }

    pub fn try_set_license_key(&mut self, key: Option<&str>) -> bool {
        self.digital_mut()
            .is_some_and(|attrs| attrs.try_set_license_key(key))
    }

    pub(crate) fn digital_attributes_mut(&mut self) -> Option<&mut DigitalAttributes> {
        self.digital_mut()
    }

    pub(crate) fn link_category(&mut self, category_id: Option<u64>) {
        self.category_id = category_id;
    }

    /// Serializable view for API callers.
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind.label().to_string(),
            price: self.price(),
            cost_price: self.cost_price(),
            quantity: self.quantity,
            stock_status: self.stock_status(),
            category_id: self.category_id,
            shipping_estimate: self.shipping_estimate(),
            license_required: self.is_license_required(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Item[id={}, name='{}', price={}, quantity={}]",
            self.id,
            self.name,
            self.price(),
            self.quantity
        )?;
        match &self.kind {
            ItemKind::Generic => Ok(()),
            ItemKind::Physical(attrs) => write!(f, " | Physical[weight={:.2}kg]", attrs.weight_kg()),
            ItemKind::Digital(attrs) => write!(
                f,
                " | Digital[size={:.2}MB, license={}]",
                attrs.download_size_mb(),
                attrs.is_license_required()
            ),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only, serializable copy of an item's observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// "generic", "physical" or "digital".
    pub kind: String,
    pub price: Money,
    pub cost_price: Money,
    pub quantity: i64,
    pub stock_status: StockStatus,
    pub category_id: Option<u64>,
    pub shipping_estimate: Option<Money>,
    pub license_required: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

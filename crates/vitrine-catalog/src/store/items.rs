//! # Item Store
//!
//! Keyed store of items, plus the id generator and construction mode used
//! for items registered through it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};
use ts_rs::TS;
use vitrine_core::validation::validate_id;
use vitrine_core::{ConstructionMode, CoreError, IdGenerator, Item, ItemBuilder, SequentialIds};

use super::{read, write, CategoryStore};
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Update DTOs
// =============================================================================

/// Partial update of an item. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub cost_price: Option<f64>,
    pub quantity: Option<i64>,
    pub weight_kg: Option<f64>,
    /// `[length, width, height]` in centimetres.
    pub dimensions: Option<[f64; 3]>,
    pub download_size_mb: Option<f64>,
    pub license_key: Option<String>,
}

/// Which fields of an [`ItemUpdate`] were committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub item_id: String,
    pub applied: Vec<String>,
    pub rejected: Vec<String>,
}

impl UpdateReport {
    /// True when no field was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn record(&mut self, field: &str, accepted: bool) {
        if accepted {
            self.applied.push(field.to_string());
        } else {
            self.rejected.push(field.to_string());
        }
    }
}

impl ItemUpdate {
    /// Runs every present field through the item's validated mutator.
    pub fn apply_to(&self, item: &mut Item) -> UpdateReport {
        let mut report = UpdateReport {
            item_id: item.id().to_string(),
            ..UpdateReport::default()
        };

        if let Some(name) = &self.name {
            report.record("name", item.try_set_name(name));
        }
        if let Some(description) = &self.description {
            report.record("description", item.try_set_description(Some(description)));
        }
        if let Some(price) = self.price {
            report.record("price", item.try_set_price(price));
        }
        if let Some(cost_price) = self.cost_price {
            report.record("costPrice", item.try_set_cost_price(cost_price));
        }
        if let Some(quantity) = self.quantity {
            report.record("quantity", item.try_set_quantity(quantity));
        }
        if let Some(weight_kg) = self.weight_kg {
            report.record("weightKg", item.try_set_weight_kg(weight_kg));
        }
        if let Some([length, width, height]) = self.dimensions {
            report.record("dimensions", item.try_set_dimensions(length, width, height));
        }
        if let Some(size_mb) = self.download_size_mb {
            report.record("downloadSizeMb", item.try_set_download_size_mb(size_mb));
        }
        if let Some(key) = &self.license_key {
            report.record("licenseKey", item.try_set_license_key(Some(key)));
        }

        report
    }
}

// =============================================================================
// Catalog Store
// =============================================================================

/// Thread-safe map from item id to item.
///
/// Reads hand out clones, so callers never hold a lock.
pub struct CatalogStore {
    items: RwLock<HashMap<String, Item>>,
    ids: Arc<dyn IdGenerator>,
    mode: ConstructionMode,
}

impl CatalogStore {
    /// Empty store in permissive mode.
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        CatalogStore {
            items: RwLock::new(HashMap::new()),
            ids,
            mode: ConstructionMode::Permissive,
        }
    }

    /// Empty store using the configured id prefix and construction mode.
    pub fn from_config(config: &CatalogConfig) -> Self {
        CatalogStore::new(Arc::new(SequentialIds::new(config.id_prefix.clone())))
            .with_mode(config.construction_mode)
    }

    pub fn with_mode(mut self, mode: ConstructionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ConstructionMode {
        self.mode
    }

    /// Generator used for items that arrive without a usable id.
    pub fn id_generator(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// Builds an item with this store's generator and mode, without
    /// storing it.
    pub fn build(&self, builder: ItemBuilder) -> CatalogResult<Item> {
        Ok(builder.mode(self.mode).build(self.ids.as_ref())?)
    }

    /// Builds and stores an item, returning its id.
    pub fn insert(&self, builder: ItemBuilder) -> CatalogResult<String> {
        let item = self.build(builder)?;
        let id = item.id().to_string();
        self.put(item);
        Ok(id)
    }

    /// Stores `item` under its id, returning the item it replaced.
    pub fn put(&self, item: Item) -> Option<Item> {
        let id = item.id().to_string();
        let previous = write(&self.items).insert(id.clone(), item);
        if previous.is_some() {
            debug!(item_id = %id, "Item replaced");
        } else {
            info!(item_id = %id, "Item stored");
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<Item> {
        read(&self.items).get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        read(&self.items).contains_key(id)
    }

    pub fn remove(&self, id: &str) -> Option<Item> {
        let removed = write(&self.items).remove(id);
        if removed.is_some() {
            info!(item_id = %id, "Item removed");
        }
        removed
    }

    /// Snapshot of every item, ordered by id.
    pub fn list_all(&self) -> Vec<Item> {
        let mut items: Vec<Item> = read(&self.items).values().cloned().collect();
        items.sort_by(|a, b| a.id().cmp(b.id()));
        items
    }

    pub fn len(&self) -> usize {
        read(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.items).is_empty()
    }

    /// Items whose `category_id` is `category_id`, ordered by id.
    pub fn find_by_category_id(&self, category_id: u64) -> Vec<Item> {
        let mut items: Vec<Item> = read(&self.items)
            .values()
            .filter(|item| item.category_id() == Some(category_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id().cmp(b.id()));
        items
    }

    /// Items in the category called `name` (any case). Empty when there is
    /// no such category.
    pub fn find_by_category_name(&self, categories: &CategoryStore, name: &str) -> Vec<Item> {
        match categories.by_name(name) {
            Some(category) => self.find_by_category_id(category.id()),
            None => Vec::new(),
        }
    }

    /// Runs `f` against the stored item under a read lock.
    pub fn with_item<R>(&self, id: &str, f: impl FnOnce(&Item) -> R) -> Option<R> {
        read(&self.items).get(id).map(f)
    }

    /// Runs `f` against the stored item under the write lock.
    ///
    /// `f` works on a copy that replaces the stored item afterwards. If `f`
    /// changed the id, the entry moves to the new key. An id change onto a
    /// taken id, or of an item filed in a category, is discarded together
    /// with everything else `f` did and gives `None`; rename category
    /// members through [`CategoryStore::rename_item`].
    pub fn with_item_mut<R>(&self, id: &str, f: impl FnOnce(&mut Item) -> R) -> Option<R> {
        let mut items = write(&self.items);
        let mut draft = items.get(id)?.clone();
        let result = f(&mut draft);

        if draft.id() == id {
            items.insert(id.to_string(), draft);
            return Some(result);
        }

        if draft.category_id().is_some() || items.contains_key(draft.id()) {
            debug!(item_id = %id, refused = %draft.id(), "Re-key refused");
            return None;
        }

        items.remove(id);
        debug!(from = %id, to = %draft.id(), "Item re-keyed");
        items.insert(draft.id().to_string(), draft);
        Some(result)
    }

    /// Moves the item stored under `from` to the key `to`, updating its id.
    /// Category membership is left to the caller.
    pub(crate) fn rekey(&self, from: &str, to: &str) -> CatalogResult<Item> {
        let to = validate_id(to).map_err(CoreError::from)?;

        let mut items = write(&self.items);
        if to != from && items.contains_key(&to) {
            return Err(CatalogError::duplicate("item id", to));
        }
        let mut item = items
            .remove(from)
            .ok_or_else(|| CatalogError::not_found("Item", from))?;

        item.try_set_id(&to);
        items.insert(to.clone(), item.clone());
        debug!(from, to = %to, "Item re-keyed");
        Ok(item)
    }

    /// Applies a partial update. `None` when the item does not exist.
    pub fn update(&self, id: &str, update: &ItemUpdate) -> Option<UpdateReport> {
        let report = self.with_item_mut(id, |item| update.apply_to(item))?;
        if report.is_clean() {
            debug!(item_id = %id, applied = ?report.applied, "Item updated");
        } else {
            debug!(item_id = %id, rejected = ?report.rejected, "Item update partially rejected");
        }
        Some(report)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        CatalogStore::new(Arc::new(SequentialIds::default()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{ItemKind, Money};

    fn store() -> CatalogStore {
        CatalogStore::default()
    }

    #[test]
    fn test_put_get_remove() {
        let store = store();
        let mug = Item::generic("G-MUG", "Mug", 10.0, store.id_generator());

        assert!(store.put(mug.clone()).is_none());
        assert_eq!(store.get("G-MUG").unwrap().name(), "Mug");
        assert!(store.put(mug).is_some());
        assert_eq!(store.len(), 1);

        assert!(store.remove("G-MUG").is_some());
        assert!(store.get("G-MUG").is_none());
        assert!(store.remove("G-MUG").is_none());
    }

    #[test]
    fn test_insert_uses_store_generator_and_mode() {
        let store = CatalogStore::new(Arc::new(SequentialIds::new("SKU-")));
        let id = store
            .insert(Item::builder(ItemKind::Generic).name("Mug").price(10.0))
            .unwrap();
        assert_eq!(id, "SKU-1");

        let strict = CatalogStore::default().with_mode(ConstructionMode::Strict);
        let err = strict
            .insert(Item::builder(ItemKind::Generic).name("M"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Core(CoreError::InvalidConstruction(_))));
        assert!(strict.is_empty());
    }

    #[test]
    fn test_list_all_is_ordered() {
        let store = store();
        for id in ["G-C", "G-A", "G-B"] {
            store.put(Item::generic(id, "Thing", 1.0, store.id_generator()));
        }
        let ids: Vec<String> = store.list_all().iter().map(|i| i.id().to_string()).collect();
        assert_eq!(ids, vec!["G-A", "G-B", "G-C"]);
    }

    #[test]
    fn test_update_reports_rejections() {
        let store = store();
        store.put(Item::generic("G-MUG", "Mug", 10.0, store.id_generator()));

        let update = ItemUpdate {
            name: Some("Big Mug".to_string()),
            price: Some(-3.0),
            quantity: Some(12),
            weight_kg: Some(1.0),
            ..ItemUpdate::default()
        };
        let report = store.update("G-MUG", &update).unwrap();

        assert_eq!(report.applied, vec!["name", "quantity"]);
        assert_eq!(report.rejected, vec!["price", "weightKg"]);
        let mug = store.get("G-MUG").unwrap();
        assert_eq!(mug.name(), "Big Mug");
        assert_eq!(mug.price(), Money::new(10.0));
        assert_eq!(mug.quantity(), 12);

        assert!(store.update("missing", &update).is_none());
    }

    #[test]
    fn test_update_deserializes_from_json() {
        let update: ItemUpdate =
            serde_json::from_str(r#"{"price": 99.5, "dimensions": [30, 20, 10]}"#).unwrap();
        assert_eq!(update.price, Some(99.5));
        assert_eq!(update.dimensions, Some([30.0, 20.0, 10.0]));
        assert_eq!(update.name, None);
    }

    #[test]
    fn test_with_item_mut_rekeys() {
        let store = store();
        store.put(Item::generic("G-OLD", "Mug", 10.0, store.id_generator()));
        let renamed = store.with_item_mut("G-OLD", |item| item.try_set_id("G-NEW"));
        assert_eq!(renamed, Some(true));
        assert!(store.get("G-OLD").is_none());
        assert_eq!(store.get("G-NEW").unwrap().id(), "G-NEW");
    }

    #[test]
    fn test_with_item_mut_refuses_taken_id() {
        let store = store();
        store.put(Item::generic("G-A", "Alpha", 10.0, store.id_generator()));
        store.put(Item::generic("G-B", "Beta", 20.0, store.id_generator()));

        let renamed = store.with_item_mut("G-A", |item| {
            item.try_set_price(99.0);
            item.try_set_id("G-B")
        });

        assert_eq!(renamed, None);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("G-B").unwrap().name(), "Beta");
        let alpha = store.get("G-A").unwrap();
        assert_eq!(alpha.id(), "G-A");
        assert_eq!(alpha.price(), Money::new(10.0));
    }

    #[test]
    fn test_with_item_mut_refuses_rekeying_category_members() {
        let store = store();
        let categories = CategoryStore::new();
        store.put(Item::generic("G-OLD", "Mug", 10.0, store.id_generator()));
        let mugs = categories.create("Mugs", "").unwrap();
        categories.add_item(&store, mugs.id(), "G-OLD").unwrap();

        assert_eq!(store.with_item_mut("G-OLD", |item| item.try_set_id("G-NEW")), None);
        assert!(store.contains("G-OLD"));
        assert!(!store.contains("G-NEW"));
    }

    #[test]
    fn test_rekey() {
        let store = store();
        store.put(Item::generic("G-A", "Alpha", 10.0, store.id_generator()));
        store.put(Item::generic("G-B", "Beta", 20.0, store.id_generator()));

        assert!(matches!(store.rekey("G-A", "G-B"), Err(CatalogError::Duplicate { .. })));
        assert!(matches!(store.rekey("G-A", "X"), Err(CatalogError::Core(_))));
        assert!(matches!(store.rekey("G-Q", "G-R"), Err(CatalogError::NotFound { .. })));
        assert_eq!(store.len(), 2);

        let moved = store.rekey("G-A", "G-C").unwrap();
        assert_eq!(moved.id(), "G-C");
        assert_eq!(store.get("G-C").unwrap().name(), "Alpha");
        assert!(!store.contains("G-A"));
    }
}

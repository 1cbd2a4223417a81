//! # Category Store
//!
//! Categories keyed by a numeric id, with case-insensitive name lookup.
//! Membership changes go through this store so that the category's member
//! list and the item's `category_id` move together.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::{debug, info};
use vitrine_core::validation::validate_name;
use vitrine_core::{Category, CoreError, CoreResult, Item};

use super::{read, write, CatalogStore};
use crate::error::{CatalogError, CatalogResult};

/// Thread-safe category registry.
#[derive(Debug)]
pub struct CategoryStore {
    categories: RwLock<HashMap<u64, Category>>,
    next_id: AtomicU64,
}

impl CategoryStore {
    pub fn new() -> Self {
        CategoryStore {
            categories: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a category with the next free id.
    ///
    /// ## Errors
    /// - `Duplicate` when a category with the same name exists (any case)
    /// - `Core` when the name is shorter than 2 characters
    pub fn create(&self, name: &str, description: &str) -> CatalogResult<Category> {
        let name = validate_name(name).map_err(CoreError::from)?;

        let wanted = name.to_lowercase();
        let mut categories = write(&self.categories);
        if categories
            .values()
            .any(|existing| existing.name().to_lowercase() == wanted)
        {
            return Err(CatalogError::duplicate("category name", name));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut category = Category::new(id, name);
        category.set_description(description);
        categories.insert(id, category.clone());

        info!(category_id = id, category = %category.name(), "Category created");
        Ok(category)
    }

    pub fn get(&self, id: u64) -> Option<Category> {
        read(&self.categories).get(&id).cloned()
    }

    /// Case-insensitive lookup by name.
    pub fn by_name(&self, name: &str) -> Option<Category> {
        let wanted = name.trim().to_lowercase();
        read(&self.categories)
            .values()
            .find(|category| category.name().to_lowercase() == wanted)
            .cloned()
    }

    /// Every category, ordered by id.
    pub fn list(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = read(&self.categories).values().cloned().collect();
        categories.sort_by_key(Category::id);
        categories
    }

    pub fn len(&self) -> usize {
        read(&self.categories).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.categories).is_empty()
    }

    /// Puts a stored item into a category, moving it out of its previous
    /// category if it had one.
    pub fn add_item(&self, items: &CatalogStore, category_id: u64, item_id: &str) -> CatalogResult<()> {
        let mut categories = write(&self.categories);
        if !categories.contains_key(&category_id) {
            return Err(CatalogError::not_found("Category", category_id.to_string()));
        }

        items
            .with_item_mut(item_id, |item| -> CoreResult<()> {
                if let Some(previous) = item.category_id().filter(|id| *id != category_id) {
                    if let Some(old) = categories.get_mut(&previous) {
                        // a stale back-reference is simply overwritten below
                        old.remove_item(item).ok();
                    }
                }
                match categories.get_mut(&category_id) {
                    Some(category) => category.add_item(item),
                    None => Ok(()),
                }
            })
            .ok_or_else(|| CatalogError::not_found("Item", item_id))??;

        Ok(())
    }

    /// Takes a stored item out of a category.
    pub fn remove_item(&self, items: &CatalogStore, category_id: u64, item_id: &str) -> CatalogResult<()> {
        let mut categories = write(&self.categories);
        let category = categories
            .get_mut(&category_id)
            .ok_or_else(|| CatalogError::not_found("Category", category_id.to_string()))?;

        items
            .with_item_mut(item_id, |item| category.remove_item(item))
            .ok_or_else(|| CatalogError::not_found("Item", item_id))??;

        Ok(())
    }

    /// Deletes a category and clears `category_id` on its members.
    pub fn delete(&self, items: &CatalogStore, category_id: u64) -> CatalogResult<Category> {
        let mut categories = write(&self.categories);
        let mut category = categories
            .remove(&category_id)
            .ok_or_else(|| CatalogError::not_found("Category", category_id.to_string()))?;

        for item_id in category.item_ids().to_vec() {
            let cleared = items.with_item_mut(&item_id, |item| category.remove_item(item).is_ok());
            if cleared != Some(true) {
                category.forget(&item_id);
            }
        }

        info!(category_id, category = %category.name(), "Category deleted");
        Ok(category)
    }

    /// Changes a stored item's id and rewrites its entry in the category it
    /// belongs to.
    ///
    /// ## Errors
    /// - `NotFound` when no item is stored under `from`
    /// - `Duplicate` when another item already uses `to`
    /// - `Core` when `to` is not a valid id
    pub fn rename_item(&self, items: &CatalogStore, from: &str, to: &str) -> CatalogResult<Item> {
        let mut categories = write(&self.categories);
        let item = items.rekey(from, to)?;

        if let Some(category) = item.category_id().and_then(|id| categories.get_mut(&id)) {
            category.rename_member(from, item.id());
        }

        info!(from, to = %item.id(), "Item renamed");
        Ok(item)
    }

    /// Drops `item_id` from every category without touching the item, for
    /// items that left the store.
    pub fn forget_item(&self, item_id: &str) {
        let mut categories = write(&self.categories);
        for category in categories.values_mut() {
            if category.forget(item_id) {
                debug!(item_id, category = %category.name(), "Dangling member dropped");
            }
        }
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        CategoryStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (CatalogStore, CategoryStore) {
        let items = CatalogStore::default();
        items.put(Item::generic("P-1", "Laptop", 450_000.0, items.id_generator()));
        items.put(Item::generic("P-2", "Phone", 300_000.0, items.id_generator()));
        (items, CategoryStore::new())
    }

    #[test]
    fn test_create_and_lookup() {
        let store = CategoryStore::new();
        let games = store.create("Games", "Video games").unwrap();
        assert_eq!(games.id(), 1);
        assert_eq!(store.by_name("gAMES").unwrap().id(), 1);
        assert_eq!(store.get(1).unwrap().description(), "Video games");
        assert!(store.by_name("Books").is_none());

        assert!(matches!(
            store.create("GAMES", ""),
            Err(CatalogError::Duplicate { .. })
        ));
        assert!(matches!(store.create(" ", ""), Err(CatalogError::Core(_))));
        assert_eq!(store.create("Books", "").unwrap().id(), 2);
    }

    #[test]
    fn test_membership_moves_both_sides() {
        let (items, categories) = fixture();
        let laptops = categories.create("Laptops", "").unwrap();
        let sale = categories.create("Sale", "").unwrap();

        categories.add_item(&items, laptops.id(), "P-1").unwrap();
        assert_eq!(items.get("P-1").unwrap().category_id(), Some(laptops.id()));
        assert!(categories.get(laptops.id()).unwrap().contains("P-1"));

        categories.add_item(&items, sale.id(), "P-1").unwrap();
        assert_eq!(items.get("P-1").unwrap().category_id(), Some(sale.id()));
        assert!(!categories.get(laptops.id()).unwrap().contains("P-1"));

        assert!(matches!(
            categories.add_item(&items, sale.id(), "P-1"),
            Err(CatalogError::Core(CoreError::AlreadyInCategory { .. }))
        ));
        assert!(matches!(
            categories.add_item(&items, sale.id(), "nope"),
            Err(CatalogError::NotFound { .. })
        ));

        categories.remove_item(&items, sale.id(), "P-1").unwrap();
        assert_eq!(items.get("P-1").unwrap().category_id(), None);
    }

    #[test]
    fn test_delete_clears_members() {
        let (items, categories) = fixture();
        let phones = categories.create("Phones", "").unwrap();
        categories.add_item(&items, phones.id(), "P-1").unwrap();
        categories.add_item(&items, phones.id(), "P-2").unwrap();
        items.remove("P-2");

        let deleted = categories.delete(&items, phones.id()).unwrap();
        assert!(deleted.is_empty());
        assert_eq!(items.get("P-1").unwrap().category_id(), None);
        assert!(categories.get(phones.id()).is_none());
        assert!(categories.delete(&items, phones.id()).is_err());
    }

    #[test]
    fn test_rename_keeps_membership_in_step() {
        let (items, categories) = fixture();
        let laptops = categories.create("Laptops", "").unwrap();
        categories.add_item(&items, laptops.id(), "P-1").unwrap();

        let renamed = categories.rename_item(&items, "P-1", "P-100").unwrap();
        assert_eq!(renamed.id(), "P-100");
        assert_eq!(renamed.category_id(), Some(laptops.id()));
        assert_eq!(categories.get(laptops.id()).unwrap().item_ids(), ["P-100"]);

        categories.remove_item(&items, laptops.id(), "P-100").unwrap();
        assert_eq!(items.get("P-100").unwrap().category_id(), None);
        assert!(categories.get(laptops.id()).unwrap().is_empty());
    }

    #[test]
    fn test_rename_onto_taken_id_changes_nothing() {
        let (items, categories) = fixture();
        let laptops = categories.create("Laptops", "").unwrap();
        categories.add_item(&items, laptops.id(), "P-1").unwrap();

        assert!(matches!(
            categories.rename_item(&items, "P-1", "P-2"),
            Err(CatalogError::Duplicate { .. })
        ));
        assert_eq!(items.len(), 2);
        assert_eq!(items.get("P-1").unwrap().name(), "Laptop");
        assert_eq!(items.get("P-2").unwrap().name(), "Phone");
        assert_eq!(categories.get(laptops.id()).unwrap().item_ids(), ["P-1"]);
    }

    #[test]
    fn test_find_by_category_name() {
        let (items, categories) = fixture();
        let phones = categories.create("Phones", "").unwrap();
        categories.add_item(&items, phones.id(), "P-2").unwrap();

        let found = items.find_by_category_name(&categories, "PHONES");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "P-2");
        assert!(items.find_by_category_name(&categories, "Tablets").is_empty());
    }
}

//! # Categories
//!
//! A category owns a list of item ids. The item side only stores the
//! category's numeric id, and both sides change in the same call.
//!
//! ```text
//! Category { id: 1, item_ids: ["P-LAP", "P-PHN"] }
//!                               │         │
//!            Item { id: "P-LAP", category_id: Some(1) }
//!            Item { id: "P-PHN", category_id: Some(1) }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::item::Item;
use crate::money::Money;

/// Non-owning grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: u64,
    name: String,
    description: String,
    item_ids: Vec<String>,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Category {
            id,
            name: name.into(),
            description: String::new(),
            item_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Member ids in insertion order.
    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.item_ids.iter().any(|id| id == item_id)
    }

    /// Adds `item` and points its `category_id` here.
    ///
    /// An item already listed is refused. Moving an item out of another
    /// category is the caller's job.
    pub fn add_item(&mut self, item: &mut Item) -> CoreResult<()> {
        if self.contains(item.id()) {
            return Err(CoreError::AlreadyInCategory {
                item_id: item.id().to_string(),
                category: self.name.clone(),
            });
        }
        self.item_ids.push(item.id().to_string());
        item.link_category(Some(self.id));
        debug!(item_id = %item.id(), category = %self.name, "Item added to category");
        Ok(())
    }

    /// Removes `item` and clears its `category_id`.
    pub fn remove_item(&mut self, item: &mut Item) -> CoreResult<()> {
        let position = self
            .item_ids
            .iter()
            .position(|id| id == item.id())
            .ok_or_else(|| CoreError::NotInCategory {
                item_id: item.id().to_string(),
                category: self.name.clone(),
            })?;
        self.item_ids.remove(position);
        if item.category_id() == Some(self.id) {
            item.link_category(None);
        }
        debug!(item_id = %item.id(), category = %self.name, "Item removed from category");
        Ok(())
    }

    /// Drops a member id without touching the item, for items that no
    /// longer exist.
    pub fn forget(&mut self, item_id: &str) -> bool {
        let before = self.item_ids.len();
        self.item_ids.retain(|id| id != item_id);
        self.item_ids.len() != before
    }

    /// Replaces member id `from` with `to` in place, after the item itself
    /// was re-keyed. False when `from` is not a member.
    pub fn rename_member(&mut self, from: &str, to: &str) -> bool {
        match self.item_ids.iter_mut().find(|id| id.as_str() == from) {
            Some(slot) => {
                *slot = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Sum of `price × quantity` over the members found in `items`.
    pub fn total_value<'a>(&self, items: impl IntoIterator<Item = &'a Item>) -> Money {
        items
            .into_iter()
            .filter(|item| self.contains(item.id()))
            .map(Item::calculate_total_value)
            .sum()
    }
}

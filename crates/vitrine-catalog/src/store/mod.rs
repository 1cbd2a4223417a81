//! # Stores
//!
//! In-memory keyed stores for items and categories.
//!
//! ## Locking Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   CatalogStore                         CategoryStore                    │
//! │   RwLock<HashMap<String, Item>>        RwLock<HashMap<u64, Category>>   │
//! │                                                                         │
//! │   get / list_all   → read lock, clones out                              │
//! │   put / remove     → write lock, last write wins                        │
//! │   update           → write lock held for the whole patch                │
//! │                                                                         │
//! │   Membership changes touch both maps:                                   │
//! │   categories (write) ──► items (write)    always in this order          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every critical section is a single map operation or a single item patch,
//! so a poisoned lock still guards consistent data and is recovered.

mod categories;
mod items;

pub use categories::CategoryStore;
pub use items::{CatalogStore, ItemUpdate, UpdateReport};

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

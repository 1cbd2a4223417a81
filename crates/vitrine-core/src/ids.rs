//! # Id Generators
//!
//! Items that arrive without a usable id get one from an [`IdGenerator`].
//! Generators are plain values owned by whoever creates items (normally the
//! catalog store) and passed into construction explicitly. Nothing here is
//! global, so two catalogs never share a sequence.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh item ids.
pub trait IdGenerator: Send + Sync {
    /// Returns an id that has not been handed out by this generator before.
    fn next_id(&self) -> String;
}

/// `PREFIX-1`, `PREFIX-2`, ... counter.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    /// Starts a sequence at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Starts a sequence at `first`.
    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: AtomicU64::new(first),
        }
    }

    /// The value the next call to `next_id` will use.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        SequentialIds::new(crate::DEFAULT_ID_PREFIX)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// UUID v4 ids, for catalogs fed from several writers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

//! # vitrine-core: Pricing Rules for the Vitrine Catalog
//!
//! This crate turns a unit price, a quantity and a handful of rules into one
//! payable total, and a total plus a cost basis into a margin report. It has
//! no I/O and no locking.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 API layer (not part of this repo)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ quote / profit_report                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vitrine-catalog                              │   │
//! │  │   item store, category store, policy registries, quotes        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrine-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │   item   │  │ pricing  │  │  profit  │  │ category │       │   │
//! │  │   │ Item     │  │ discount │  │ Financial│  │ Category │       │   │
//! │  │   │ ItemKind │  │ tax      │  │  Report  │  │          │       │   │
//! │  │   │ Builder  │  │ shipping │  │          │  │          │       │   │
//! │  │   └──────────┘  │ engine   │  └──────────┘  └──────────┘       │   │
//! │  │                 └──────────┘                                    │   │
//! │  │   NO I/O • NO LOCKS • POLICIES ARE IMMUTABLE VALUES            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Item, its kinds and the builder
//! - [`pricing`] - Discount, tax and shipping policies plus the final-price engine
//! - [`profit`] - Profit calculator and financial report
//! - [`category`] - Category membership
//! - [`money`] - `f64` money newtype, rounded only for display
//! - [`validation`] - Field validators shared by mutators and the builder
//! - [`ids`] - Injected id generators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::ids::SequentialIds;
//! use vitrine_core::pricing::{Buy3Pay2, ProgressiveTax, TaxPolicy};
//! use vitrine_core::{Item, Money};
//!
//! let ids = SequentialIds::default();
//! let widget = Item::generic("W-1", "Widget", 50_000.0, &ids);
//!
//! let total = widget.final_price_with(6, Some(&Buy3Pay2));
//! assert_eq!(total, Money::new(200_000.0));
//!
//! let tax = ProgressiveTax.calculate_tax(Money::new(100.0));
//! assert!(tax.approx_eq(Money::new(10.0), 1e-9));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod ids;
pub mod item;
pub mod money;
pub mod pricing;
pub mod profit;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use category::Category;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use item::{
    DigitalAttributes, Item, ItemBuilder, ItemKind, ItemSnapshot, PhysicalAttributes, Shippable,
};
pub use money::Money;
pub use profit::{FinancialReport, ProfitCalculator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum trimmed length of an id or a name.
pub const MIN_TEXT_LEN: usize = 2;

/// Maximum description length once trimmed.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Upper bound for unit price and unit cost.
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Upper bound for a stock quantity.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Quantities from 1 up to this value report [`StockStatus::Low`].
pub const LOW_STOCK_THRESHOLD: i64 = 10;

pub const MAX_WEIGHT_KG: f64 = 1000.0;

/// Per dimension.
pub const MAX_DIMENSION_CM: f64 = 1000.0;

pub const MAX_DOWNLOAD_SIZE_MB: f64 = 1_000_000.0;

pub const MAX_LICENSE_KEY_LEN: usize = 64;

/// Upper bound for a permanent markdown.
pub const MAX_MARKDOWN_PERCENT: f64 = 90.0;

/// Percentage discount policies clamp to this.
pub const MAX_PERCENT_OFF: f64 = 90.0;

/// Download sizes below this trigger the legacy digital markdown.
pub const LEGACY_MARKDOWN_THRESHOLD_MB: f64 = 500_000.0;

/// Size of the legacy digital markdown.
pub const LEGACY_MARKDOWN_PERCENT: f64 = 10.0;

/// Prefix of generated ids when nothing else is configured.
pub const DEFAULT_ID_PREFIX: &str = "AUTO-";

/// Name substituted for a missing or invalid one in permissive mode.
pub const DEFAULT_ITEM_NAME: &str = "Unnamed";

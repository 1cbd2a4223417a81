//! # vitrine-catalog: In-Memory Catalog for Vitrine
//!
//! This crate holds the shared state around the pricing core: items,
//! categories and named policies, plus the quote entry point that ties them
//! together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Data Flow                                │
//! │                                                                         │
//! │  API layer: quote("P-1", 3, "percentage-10", "flat-vat-12")            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  vitrine-catalog (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │PricingService │    │    Stores     │    │  Registries  │   │   │
//! │  │   │ (service.rs)  │───►│ CatalogStore  │    │ Discount     │   │   │
//! │  │   │               │    │ CategoryStore │    │ Tax          │   │   │
//! │  │   │ quote         │───────────────────────►│ Shipping     │   │   │
//! │  │   │ profit_report │    └───────────────┘    └──────────────┘   │   │
//! │  │   └───────────────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        vitrine-core: Item, policies, final price, profit        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`service`] - Quote, profit and registration entry points
//! - [`store`] - Item and category stores
//! - [`registry`] - Named discount, tax and shipping policies
//! - [`config`] - Configuration from the environment or JSON
//! - [`seed`] - Sample catalog
//! - [`telemetry`] - Tracing subscriber setup
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust
//! use vitrine_catalog::{telemetry, CatalogConfig, PricingService};
//!
//! telemetry::init_tracing();
//!
//! let service = PricingService::bootstrap(CatalogConfig {
//!     seed_sample_data: true,
//!     ..CatalogConfig::default()
//! })
//! .unwrap();
//!
//! let quote = service
//!     .quote_breakdown("P-1", 2, Some("percentage-10"), Some("flat-vat-12"))
//!     .unwrap();
//! println!("{}", service.format_amount(quote.total));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod registry;
pub mod seed;
pub mod service;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use registry::{DiscountRegistry, PolicyRegistry, ShippingRegistry, TaxRegistry};
pub use seed::seed_sample_data;
pub use service::{DigitalListing, PhysicalListing, PricingService, Quote};
pub use store::{CatalogStore, CategoryStore, ItemUpdate, UpdateReport};

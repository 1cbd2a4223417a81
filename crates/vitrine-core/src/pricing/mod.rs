//! # Pricing Module
//!
//! Rule families and the engine that composes them.
//!
//! ## Components
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Pricing Pipeline                               │
//! │                                                                         │
//! │   Item + qty                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   discount.rs   DiscountPolicy / Promotion  →  discounted total         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   engine.rs     precedence + PriceComposer  →  final price              │
//! │       │                                                                 │
//! │       ├──► tax.rs       TaxPolicy          →  tax on a total            │
//! │       └──► shipping.rs  ShippingPolicy     →  parcel charge             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every policy is an immutable value. Nothing in this module locks, blocks
//! or mutates an item.

pub mod discount;
pub mod engine;
pub mod shipping;
pub mod tax;

pub use discount::{
    best_of, BogoHalf, BogoHalfPromotion, Buy3Pay2, DiscountPolicy, FixedOff, FixedPromotion,
    PercentageOff, PercentagePromotion, Promotion,
};
pub use engine::PriceComposer;
pub use shipping::{
    billable_weight, volumetric_weight, ExpressShipping, FreeShipping, ShippingPolicy,
    StandardShipping,
};
pub use tax::{FlatVat, NoTax, ProgressiveTax, ReducedDigitalVat, TaxPolicy};

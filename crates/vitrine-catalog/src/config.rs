//! # Catalog Configuration
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VITRINE_*`)
//! 2. JSON document ([`CatalogConfig::from_json`])
//! 3. Defaults (this file)
//!
//! [`CatalogConfig::from_json_with_env`] layers all three. [`CatalogConfig::from_env`]
//! layers the environment over the defaults, and [`CatalogConfig::from_json`]
//! reads the document alone.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization and is cloned into the
//! services that need it.

use serde::{Deserialize, Serialize};
use tracing::warn;
use vitrine_core::{ConstructionMode, Money, DEFAULT_ID_PREFIX};

use crate::error::{CatalogError, CatalogResult};

pub const ENV_CONSTRUCTION_MODE: &str = "VITRINE_CONSTRUCTION_MODE";
pub const ENV_ID_PREFIX: &str = "VITRINE_ID_PREFIX";
pub const ENV_DEFAULT_SHIPPING: &str = "VITRINE_DEFAULT_SHIPPING";
pub const ENV_CURRENCY: &str = "VITRINE_CURRENCY";
pub const ENV_SEED: &str = "VITRINE_SEED";

const ENV_KEYS: [&str; 5] = [
    ENV_CONSTRUCTION_MODE,
    ENV_ID_PREFIX,
    ENV_DEFAULT_SHIPPING,
    ENV_CURRENCY,
    ENV_SEED,
];

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    /// How items registered through the catalog treat invalid fields.
    pub construction_mode: ConstructionMode,

    /// Prefix for generated item ids.
    pub id_prefix: String,

    /// Shipping registry key used when a physical item names an unknown one.
    pub default_shipping: String,

    /// Currency code (ISO 4217), display only.
    pub currency_code: String,

    /// Decimal places shown for amounts.
    pub currency_decimals: u8,

    /// Install the sample catalog at startup.
    pub seed_sample_data: bool,
}

impl Default for CatalogConfig {
    /// Permissive construction, `AUTO-` ids, standard shipping, KZT.
    fn default() -> Self {
        CatalogConfig {
            construction_mode: ConstructionMode::Permissive,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            default_shipping: "standard".to_string(),
            currency_code: "KZT".to_string(),
            currency_decimals: 2,
            seed_sample_data: false,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by environment variables. A value that does not
    /// parse is logged and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Like [`CatalogConfig::from_env`], but a value that does not parse is
    /// an error.
    ///
    /// ## Environment Variables
    /// - `VITRINE_CONSTRUCTION_MODE`: `permissive` or `strict`
    /// - `VITRINE_ID_PREFIX`: prefix for generated ids
    /// - `VITRINE_DEFAULT_SHIPPING`: fallback shipping key
    /// - `VITRINE_CURRENCY`: currency code for display
    /// - `VITRINE_SEED`: `true`/`false`/`1`/`0`
    pub fn try_from_env() -> CatalogResult<Self> {
        Self::try_from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Parses a JSON document, then lets environment variables override it.
    ///
    /// ## Errors
    /// `Config` when the document or an environment value does not parse.
    pub fn from_json_with_env(json: &str) -> CatalogResult<Self> {
        Self::from_json(json)?.try_overlay(|key| std::env::var(key).ok())
    }

    pub(crate) fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CatalogResult<Self> {
        CatalogConfig::default().try_overlay(lookup)
    }

    /// Applies every variable `lookup` knows on top of `self`.
    pub(crate) fn try_overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> CatalogResult<Self> {
        for key in ENV_KEYS {
            if let Some(value) = lookup(key) {
                self.apply(key, &value)?;
            }
        }
        Ok(self)
    }

    fn from_lookup_lenient(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = CatalogConfig::default();
        for key in ENV_KEYS {
            if let Some(value) = lookup(key) {
                if let Err(err) = config.apply(key, &value) {
                    warn!(key, error = %err, "Ignoring configuration value");
                }
            }
        }
        config
    }

    fn apply(&mut self, key: &str, value: &str) -> CatalogResult<()> {
        let value = value.trim();
        match key {
            ENV_CONSTRUCTION_MODE => {
                self.construction_mode = value
                    .parse()
                    .map_err(|e| CatalogError::Config(format!("{key}: {e}")))?;
            }
            ENV_ID_PREFIX => {
                if value.is_empty() {
                    return Err(CatalogError::Config(format!("{key} must not be empty")));
                }
                self.id_prefix = value.to_string();
            }
            ENV_DEFAULT_SHIPPING => {
                if value.is_empty() {
                    return Err(CatalogError::Config(format!("{key} must not be empty")));
                }
                self.default_shipping = value.to_ascii_lowercase();
            }
            ENV_CURRENCY => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(CatalogError::Config(format!(
                        "{key} must be a three-letter code, got '{value}'"
                    )));
                }
                self.currency_code = value.to_ascii_uppercase();
            }
            ENV_SEED => {
                self.seed_sample_data = match value.to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => true,
                    "0" | "false" | "no" | "off" => false,
                    other => {
                        return Err(CatalogError::Config(format!(
                            "{key} must be a boolean, got '{other}'"
                        )))
                    }
                };
            }
            _ => {}
        }
        Ok(())
    }

    /// Formats an amount for display, e.g. `"405000.00 KZT"`.
    ///
    /// This is the only place amounts are rounded.
    pub fn format_amount(&self, amount: Money) -> String {
        format!(
            "{:.places$} {}",
            amount.rounded(self.currency_decimals),
            self.currency_code,
            places = usize::from(self.currency_decimals)
        )
    }
}

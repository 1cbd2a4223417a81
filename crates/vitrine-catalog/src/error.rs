//! # Catalog Error Types
//!
//! Error types for catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (vitrine-core)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds lookup and configuration context    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  API layer decides whether a miss becomes a 404                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plain lookups (`get`, `quote`) return `Option` or a zero amount instead
//! of an error. `CatalogError` is reserved for operations that cannot
//! silently degrade.

use thiserror::Error;
use vitrine_core::CoreError;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Category membership change for an unknown item or category
    /// - Deleting a category that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique name already taken.
    ///
    /// ## When This Occurs
    /// - Creating a category whose name matches an existing one (any case)
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The pricing core refused the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        CatalogError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::ValidationError;

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::not_found("Item", "P-1").to_string(),
            "Item not found: P-1"
        );
        assert_eq!(
            CatalogError::duplicate("category name", "Games").to_string(),
            "Duplicate category name: 'Games' already exists"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let core = CoreError::from(ValidationError::Required {
            field: "name".to_string(),
        });
        let err = CatalogError::from(core);
        assert_eq!(err.to_string(), "Invalid item: name is required");
    }
}
